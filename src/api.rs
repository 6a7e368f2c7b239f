//! Wire-level vocabulary of the GCS API: endpoint paths, header names, the error-code
//! registry, and the request description consumed by the request layer.

pub mod call;
pub mod code;
pub mod path;

pub use call::*;
pub use code::*;
pub use path::*;

/// Header carrying the access token on authenticated calls, and returning it from sign-in and
/// refresh.
pub const ACCESS_TOKEN_HEADER: &str = "access-token";
/// Header carrying the refresh token; only ever sent to the refresh endpoint.
pub const REFRESH_TOKEN_HEADER: &str = "refresh-token";
