use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// 题目答案或选项的取值
///
/// 模型可能返回字符串、布尔值，偶尔也会返回数字；数字统一按文本保存。
/// 数组、对象等其它形态原样保留在 `Other` 中，显示为紧凑 JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Text(String),
    Other(Value),
}

impl Default for AnswerValue {
    fn default() -> Self {
        AnswerValue::Text(String::new())
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Bool(b) => write!(f, "{}", b),
            AnswerValue::Text(s) => f.write_str(s),
            AnswerValue::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Bool(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
        use serde::de::{MapAccess, SeqAccess, Visitor};

        struct AnswerVisitor;

        impl<'de> Visitor<'de> for AnswerVisitor {
            type Value = AnswerValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(AnswerValue::Bool(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(AnswerValue::Text(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(AnswerValue::Text(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(AnswerValue::Text(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(AnswerValue::Text(value.to_string()))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(AnswerValue::default())
            }

            fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                Value::deserialize(SeqAccessDeserializer::new(seq)).map(AnswerValue::Other)
            }

            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                Value::deserialize(MapAccessDeserializer::new(map)).map(AnswerValue::Other)
            }
        }

        deserializer.deserialize_any(AnswerVisitor)
    }
}

/// 任意 JSON 取值按 `AnswerValue` 的显示文本读入
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    AnswerValue::deserialize(deserializer).map(|value| value.to_string())
}

/// 模型生成的一道题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub question: String,
    #[serde(default)]
    pub answer: AnswerValue,
    /// 保留原始 JSON，非数组时渲染兜底提示
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl Item {
    /// 仅当 `options` 是数组时返回选项列表
    ///
    /// 对象、嵌套数组等元素以 `AnswerValue::Other` 保留
    pub fn options(&self) -> Option<Vec<AnswerValue>> {
        match &self.options {
            Some(Value::Array(values)) => Some(
                values
                    .iter()
                    .map(|v| {
                        serde_json::from_value(v.clone())
                            .unwrap_or_else(|_| AnswerValue::Other(v.clone()))
                    })
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn is_correct(&self, choice: &AnswerValue) -> bool {
        &self.answer == choice
    }
}
