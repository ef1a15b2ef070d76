// Decode raw input and validate the result

use crate::{Error, Record, Result, Validator, ValidatorConfig};
use ruletag_log::debug;
use serde::de::DeserializeOwned;
use std::io::Read;
use tokio::io::{AsyncRead, AsyncReadExt};

const TARGET: &str = "ruletag::bind";

/// Decodes JSON into a record type and validates it in one step.
#[derive(Debug, Clone, Default)]
pub struct Binder {
    validator: Validator,
}

impl Binder {
    /// Create a binder with the given configuration
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            validator: Validator::new(config),
        }
    }

    /// Get the underlying validator
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Reject empty input, decode, then validate.
    pub fn bind<T>(&self, input: &[u8]) -> Result<T>
    where
        T: DeserializeOwned + Record,
    {
        if self.is_empty_input(input) {
            debug!(target: TARGET, "rejecting empty input ({} bytes)", input.len());
            return Err(Error::EmptyInput);
        }

        let parsed: T = serde_json::from_slice(input).map_err(|err| {
            debug!(target: TARGET, "decode failed: {}", err);
            Error::Decode(err)
        })?;

        self.validator.validate(&parsed)?;

        Ok(parsed)
    }

    /// Read a whole stream, then [`bind`](Self::bind) it.
    pub fn bind_reader<T, R>(&self, mut reader: R) -> Result<T>
    where
        T: DeserializeOwned + Record,
        R: Read,
    {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        self.bind(&buf)
    }

    /// Read a whole async stream, then [`bind`](Self::bind) it.
    pub async fn bind_async_reader<T, R>(&self, mut reader: R) -> Result<T>
    where
        T: DeserializeOwned + Record,
        R: AsyncRead + Unpin,
    {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        self.bind(&buf)
    }

    fn is_empty_input(&self, input: &[u8]) -> bool {
        let input = if self.validator.config().trim_input {
            input.trim_ascii()
        } else {
            input
        };

        input.is_empty() || (self.validator.config().reject_empty_object && input == b"{}")
    }
}

/// Bind a byte slice with the default configuration.
pub fn bind<T: DeserializeOwned + Record>(input: &[u8]) -> Result<T> {
    Binder::default().bind(input)
}

/// Bind a string with the default configuration.
pub fn bind_str<T: DeserializeOwned + Record>(input: &str) -> Result<T> {
    Binder::default().bind(input.as_bytes())
}

/// Bind a reader with the default configuration.
pub fn bind_reader<T: DeserializeOwned + Record, R: Read>(reader: R) -> Result<T> {
    Binder::default().bind_reader(reader)
}

/// Bind an async reader with the default configuration.
pub async fn bind_async_reader<T, R>(reader: R) -> Result<T>
where
    T: DeserializeOwned + Record,
    R: AsyncRead + Unpin,
{
    Binder::default().bind_async_reader(reader).await
}
