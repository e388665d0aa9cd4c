//! Typed view of a parsed asset document.
use serde_yaml_ng::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum AssetValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<AssetValue>),
    /// Keys and values in document order.
    Mapping(Vec<(AssetValue, AssetValue)>),
}

impl AssetValue {
    /// Looks up a mapping entry by string key.
    pub fn get(&self, key: &str) -> Option<&AssetValue> {
        match self {
            AssetValue::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AssetValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AssetValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[AssetValue]> {
        match self {
            AssetValue::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, AssetValue::Mapping(_))
    }

    /// Renders a scalar as table text. Null and containers render empty.
    pub fn to_cell(&self) -> String {
        match self {
            AssetValue::Bool(b) => b.to_string(),
            AssetValue::Int(i) => i.to_string(),
            AssetValue::Float(f) => f.to_string(),
            AssetValue::String(s) => s.clone(),
            AssetValue::Null | AssetValue::Sequence(_) | AssetValue::Mapping(_) => String::new(),
        }
    }

    /// Collects every string leaf in traversal order.
    ///
    /// Mapping keys are skipped; only values are visited.
    pub fn collect_strings<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            AssetValue::String(s) => out.push(s),
            AssetValue::Sequence(seq) => {
                for v in seq {
                    v.collect_strings(out);
                }
            }
            AssetValue::Mapping(entries) => {
                for (_, v) in entries {
                    v.collect_strings(out);
                }
            }
            AssetValue::Null | AssetValue::Bool(_) | AssetValue::Int(_) | AssetValue::Float(_) => {}
        }
    }
}

impl From<Value> for AssetValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AssetValue::Null,
            Value::Bool(b) => AssetValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    AssetValue::Int(i)
                } else {
                    AssetValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => AssetValue::String(s),
            Value::Sequence(seq) => {
                AssetValue::Sequence(seq.into_iter().map(AssetValue::from).collect())
            }
            Value::Mapping(map) => AssetValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (AssetValue::from(k), AssetValue::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => AssetValue::from(tagged.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> AssetValue {
        AssetValue::from(serde_yaml_ng::from_str::<Value>(s).unwrap())
    }

    #[test]
    fn test_from_yaml() {
        let v = parse("a: 1\nb: [x, 2.5, true, ~]\nc: {d: \"e\"}\n");
        assert_eq!(v.get("a"), Some(&AssetValue::Int(1)));
        assert_eq!(
            v.get("b"),
            Some(&AssetValue::Sequence(vec![
                AssetValue::String("x".into()),
                AssetValue::Float(2.5),
                AssetValue::Bool(true),
                AssetValue::Null,
            ]))
        );
        assert_eq!(
            v.get("c").and_then(|c| c.get("d")).and_then(|d| d.as_str()),
            Some("e")
        );
        assert_eq!(v.get("missing"), None);
        assert_eq!(AssetValue::Int(3).get("a"), None);
    }

    #[test]
    fn test_collect_strings_skips_keys() {
        let v = parse(
            "- first\n- key: second\n  other:\n    - third\n    - 4\n- [fourth, {k: fifth}]\n",
        );
        let mut out = Vec::new();
        v.collect_strings(&mut out);
        assert_eq!(out, vec!["first", "second", "third", "fourth", "fifth"]);
    }

    #[test]
    fn test_to_cell() {
        assert_eq!(AssetValue::Int(0).to_cell(), "0");
        assert_eq!(AssetValue::Null.to_cell(), "");
        assert_eq!(AssetValue::String("2".into()).to_cell(), "2");
        assert_eq!(AssetValue::Sequence(vec![]).to_cell(), "");
    }
}
