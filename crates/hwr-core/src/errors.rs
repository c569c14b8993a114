/// Core error type for the notifier.
///
/// Adapter crates map their specific errors into this type so the poll loop can
/// report every failure the same way. The pipeline variants render in Russian
/// because their text is forwarded to the chat.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Ошибка конфигурации: {0}")]
    Config(String),

    #[error("Не удалось выполнить запрос к API: {0}")]
    Transport(String),

    #[error("Сервер с данными недоступен. Ошибка 503.")]
    ServiceUnavailable,

    #[error("Проблема с получением данных. Код {0}.")]
    UnexpectedStatus(u16),

    #[error("Ответ сервера не удалось разобрать: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Данные по статусу работ некорректны: {0}")]
    MalformedData(String),

    #[error("В данных сервера отсутствует необходимый ключ: {0}")]
    MissingField(String),

    #[error("Ошибка доставки сообщения: {0}")]
    Delivery(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_mention_the_code() {
        assert_eq!(
            Error::ServiceUnavailable.to_string(),
            "Сервер с данными недоступен. Ошибка 503."
        );
        assert_eq!(
            Error::UnexpectedStatus(404).to_string(),
            "Проблема с получением данных. Код 404."
        );
    }

    #[test]
    fn json_errors_convert_into_decode() {
        fn decode(body: &str) -> Result<serde_json::Value> {
            Ok(serde_json::from_str(body)?)
        }

        let err = decode("not json").unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "{err:?}");
        assert!(err.to_string().starts_with("Ответ сервера не удалось разобрать: "));
    }
}
