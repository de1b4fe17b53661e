use serde::{Deserialize, Serialize};

/// Byte encoding of the rendered view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Latin1,
    Utf8,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Character {ch:?} at position {position} cannot be encoded as latin1")]
    Unrepresentable { ch: char, position: usize },
}

/// Latin-1 is strict: the first character above U+00FF fails the whole text.
pub fn encode(text: &str, encoding: Encoding) -> Result<Vec<u8>, EncodeError> {
    match encoding {
        Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
        Encoding::Latin1 => text
            .chars()
            .enumerate()
            .map(|(position, ch)| {
                u8::try_from(ch).map_err(|_| EncodeError::Unrepresentable { ch, position })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_maps_each_char_to_one_byte() {
        assert_eq!(encode("Aé", Encoding::Latin1).unwrap(), vec![0x41, 0xE9]);
    }

    #[test]
    fn latin1_rejects_wide_chars() {
        assert_eq!(
            encode("ok → no", Encoding::Latin1),
            Err(EncodeError::Unrepresentable {
                ch: '→',
                position: 3
            })
        );
    }

    #[test]
    fn utf8_keeps_bytes() {
        assert_eq!(encode("é", Encoding::Utf8).unwrap(), "é".as_bytes());
    }
}
