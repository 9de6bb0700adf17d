//! Configuration repository port (interface).

use crate::error::Result;

/// Port for configuration persistence.
///
/// This trait defines the interface for storing and retrieving
/// scanner session settings.
pub trait ConfigRepository: Send + Sync {
    /// Get the code type used for input lines without a type prefix.
    fn get_default_code_type(&self) -> impl std::future::Future<Output = Result<char>> + Send;

    /// Set the code type used for input lines without a type prefix.
    fn set_default_code_type(
        &self,
        code_type: char,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Get the separator between type prefix and text.
    fn get_type_separator(&self) -> impl std::future::Future<Output = Result<char>> + Send;

    /// Set the separator between type prefix and text.
    fn set_type_separator(
        &self,
        separator: char,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Get whether the port is opened when a session starts.
    fn get_auto_enable(&self) -> impl std::future::Future<Output = Result<bool>> + Send;

    /// Set whether the port is opened when a session starts.
    fn set_auto_enable(&self, enabled: bool)
        -> impl std::future::Future<Output = Result<()>> + Send;

    /// Get whether output is written as JSON.
    fn get_json_output(&self) -> impl std::future::Future<Output = Result<bool>> + Send;

    /// Set whether output is written as JSON.
    fn set_json_output(&self, enabled: bool)
        -> impl std::future::Future<Output = Result<()>> + Send;
}
