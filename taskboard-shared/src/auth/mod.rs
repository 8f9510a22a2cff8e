/// Authentication utilities
///
/// # Modules
///
/// - [`jwt`]: Identity token signing and validation
/// - [`middleware`]: Bearer-token extraction and request auth context
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::auth::jwt::{create_token, IdentityClaims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = IdentityClaims::new("sub-123", "jdoe", "jdoe@example.com");
/// let token = create_token(&claims, "secret-key")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
