//! Big integers travel as decimal strings, which any JSON consumer can carry losslessly. Small
//! unsigned JSON numbers are accepted on input as well.

use num::{BigUint, Num};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    value.to_str_radix(10).serialize(serializer)
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StringOrUint {
    String(String),
    Uint(u64),
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
where
    D: Deserializer<'de>,
{
    let su: StringOrUint = Deserialize::deserialize(deserializer)?;
    match su {
        StringOrUint::String(s) => BigUint::from_str_radix(&s, 10).map_err(de::Error::custom),
        StringOrUint::Uint(u) => Ok(BigUint::from(u)),
    }
}

#[cfg(test)]
mod tests {
    use num::BigUint;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super")]
        value: BigUint,
    }

    #[test]
    fn writes_decimal_string() {
        let w = Wrapper {
            value: BigUint::from(1_u8) << 80_usize,
        };
        assert_eq!(
            serde_json::to_string(&w).unwrap(),
            r#"{"value":"1208925819614629174706176"}"#
        );
    }

    #[test]
    fn reads_string_or_number() {
        let from_str: Wrapper = serde_json::from_str(r#"{"value":"42"}"#).unwrap();
        let from_num: Wrapper = serde_json::from_str(r#"{"value":42}"#).unwrap();
        assert_eq!(from_str, from_num);
    }

    #[test]
    fn rejects_negative_and_garbage() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":"-1"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":"12ab"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":-1}"#).is_err());
    }
}
