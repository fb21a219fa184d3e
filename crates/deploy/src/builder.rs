//! Transfer request assembly.

use distpush_config::{BuildContext, DeployOptions};
use distpush_selection::FileSet;
use distpush_transfer::TransferRequest;

/// Assembles the request describing what to upload and how.
///
/// Performs no validation; bucket and region are checked by the caller
/// before selection starts. Server-side encryption is carried only when
/// configured.
pub fn build_transfer_request(
    options: &DeployOptions,
    context: &BuildContext,
    files: FileSet,
) -> TransferRequest {
    TransferRequest {
        cwd: context.dist_dir.clone(),
        files,
        bucket: options.bucket.clone(),
        prefix: options.prefix.clone(),
        acl: options.acl,
        manifest_path: context.manifest_path.clone(),
        cache_control: options.cache_control.clone(),
        expires: options.expires,
        server_side_encryption: options.server_side_encryption,
        batch_size: options.batch_size,
        default_mime_type: options.default_mime_type.clone(),
    }
}
