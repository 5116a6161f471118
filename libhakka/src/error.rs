use libbraille_core::TableLoadError;

/// Message shown to users when the dialect selector is not recognised.
pub const UNSUPPORTED_DIALECT_MESSAGE: &str = "⚠️ 無效腔調：請選擇有效的客語腔調";

/// Errors that abort a whole conversion call.
///
/// Per-syllable problems never surface here; they render as the error cell.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The selector names no supported dialect. Carries the rejected input.
    #[error("⚠️ 無效腔調：請選擇有效的客語腔調")]
    UnsupportedDialect(String),
    #[error("⚠️ 點字表載入失敗：{0}")]
    TableLoad(#[from] TableLoadError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_dialect_displays_user_message() {
        let err = ConvertError::UnsupportedDialect("xx".into());
        assert_eq!(err.to_string(), UNSUPPORTED_DIALECT_MESSAGE);
    }
}
