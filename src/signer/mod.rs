//! Request Signer: presigned STS GetCallerIdentity requests encoded as tokens.

pub mod header_injection;
pub mod presign;
pub mod sts;

pub use header_injection::HeaderInjectingPresigner;
pub use presign::{Presign, PresignContext, SigV4Presigner};
pub use sts::{load_sdk_config, sts_endpoint, StsTokenSigner};
