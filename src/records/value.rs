use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign};

/// Conversion from a decoded JSON value that yields `None` for any shape
/// the field does not accept.
pub trait FromJson: Sized {
    fn from_json(value: &Value) -> Option<Self>;
}

impl FromJson for String {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromJson for bool {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

/// Field deserializer that never fails: missing, null and wrong-shaped
/// values all come back as `None`. Pair with `#[serde(default)]`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromJson,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::from_json(&value))
}

/// Token quantity. Integer arithmetic stays integral until a float is involved.
///
/// Integers cover the full JSON range serde_json decodes (`i64` and `u64`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    Int(i128),
    Float(f64),
}

impl Amount {
    pub const ZERO: Amount = Amount::Int(0);

    pub fn as_f64(self) -> f64 {
        match self {
            Amount::Int(v) => v as f64,
            Amount::Float(v) => v,
        }
    }

    fn from_number(number: &Number) -> Option<Self> {
        if let Some(v) = number.as_i64() {
            return Some(Amount::Int(v.into()));
        }
        if let Some(v) = number.as_u64() {
            return Some(Amount::Int(v.into()));
        }
        number.as_f64().map(Amount::Float)
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::ZERO
    }
}

impl FromJson for Amount {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Amount::from_number(n),
            _ => None,
        }
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        match (self, rhs) {
            (Amount::Int(a), Amount::Int(b)) => a
                .checked_add(b)
                .map(Amount::Int)
                .unwrap_or(Amount::Float(a as f64 + b as f64)),
            (a, b) => Amount::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        *self = *self + rhs;
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Int(v) => write!(f, "{v}"),
            Amount::Float(v) => fmt_float(f, *v),
        }
    }
}

/// Floats always carry a fraction or an exponent so they stay distinguishable
/// from integers. Magnitudes outside `[1e-4, 1e16)` use `1.0e+20` notation.
fn fmt_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("NaN");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" });
    }

    if v == 0.0 || (1e-4..1e16).contains(&v.abs()) {
        return if v.fract() == 0.0 {
            write!(f, "{v:.1}")
        } else {
            write!(f, "{v}")
        };
    }

    let scientific = format!("{v:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let point = if mantissa.contains('.') { "" } else { ".0" };
    let sign = if exponent < 0 { '-' } else { '+' };
    write!(f, "{mantissa}{point}e{sign}{:02}", exponent.unsigned_abs())
}

/// Exact comparison of an integer against a float, without rounding the integer.
fn cmp_int_float(int: i128, float: f64) -> Ordering {
    if float.is_nan() || float >= i128::MAX as f64 {
        return Ordering::Less;
    }
    if float < i128::MIN as f64 {
        return Ordering::Greater;
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i128)) {
        Ordering::Equal if float > whole => Ordering::Less,
        Ordering::Equal if float < whole => Ordering::Greater,
        other => other,
    }
}

/// Company identifier as it appears in the input: a number or a string.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CompanyId {
    Int(i128),
    Float(f64),
    Text(String),
}

impl CompanyId {
    /// Ascending order: numbers compare numerically and precede all text ids,
    /// text ids compare bytewise.
    pub fn compare(&self, other: &CompanyId) -> Ordering {
        match (self, other) {
            (CompanyId::Int(a), CompanyId::Int(b)) => a.cmp(b),
            (CompanyId::Int(a), CompanyId::Float(b)) => cmp_int_float(*a, *b),
            (CompanyId::Float(a), CompanyId::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (CompanyId::Float(a), CompanyId::Float(b)) => {
                a.partial_cmp(b).unwrap_or_else(|| a.total_cmp(b))
            }
            (CompanyId::Text(a), CompanyId::Text(b)) => a.cmp(b),
            (CompanyId::Text(_), _) => Ordering::Greater,
            (_, CompanyId::Text(_)) => Ordering::Less,
        }
    }

    /// Sort key where a missing id sorts after every present one.
    pub fn compare_missing_last(a: Option<&CompanyId>, b: Option<&CompanyId>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => a.compare(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    pub fn join_key(&self) -> JoinKey {
        JoinKey::from(self)
    }
}

impl FromJson for CompanyId {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Amount::from_number(n).map(|amount| match amount {
                Amount::Int(v) => CompanyId::Int(v),
                Amount::Float(v) => CompanyId::Float(v),
            }),
            Value::String(s) => Some(CompanyId::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompanyId::Int(v) => write!(f, "{v}"),
            CompanyId::Float(v) => fmt_float(f, *v),
            CompanyId::Text(s) => f.write_str(s),
        }
    }
}

/// Hashable form of a [`CompanyId`] used to join users to companies.
/// `1` and `1.0` share a key; `1` and `"1"` do not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JoinKey {
    Int(i128),
    Float(u64),
    Text(String),
}

impl From<&CompanyId> for JoinKey {
    fn from(id: &CompanyId) -> Self {
        match id {
            CompanyId::Int(v) => JoinKey::Int(*v),
            CompanyId::Float(v) => {
                if v.fract() == 0.0 && *v >= i128::MIN as f64 && *v < i128::MAX as f64 {
                    JoinKey::Int(*v as i128)
                } else {
                    JoinKey::Float(v.to_bits())
                }
            }
            CompanyId::Text(s) => JoinKey::Text(s.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_display() {
        assert_eq!(Amount::Int(13).to_string(), "13");
        assert_eq!(Amount::Float(13.0).to_string(), "13.0");
        assert_eq!(Amount::Float(2.5).to_string(), "2.5");
        assert_eq!(Amount::Int(-4).to_string(), "-4");
    }

    #[test]
    fn test_float_display_switches_to_exponent() {
        assert_eq!(Amount::Float(1e20).to_string(), "1.0e+20");
        assert_eq!(Amount::Float(1.5e-5).to_string(), "1.5e-05");
        assert_eq!(Amount::Float(-2.25e300).to_string(), "-2.25e+300");
        assert_eq!(Amount::Float(1e16).to_string(), "1.0e+16");
        assert_eq!(Amount::Float(9999999999999998.0).to_string(), "9999999999999998.0");
        assert_eq!(Amount::Float(0.0001).to_string(), "0.0001");
        assert_eq!(Amount::Float(0.0).to_string(), "0.0");
        assert_eq!(CompanyId::Float(1e20).to_string(), "1.0e+20");
    }

    #[test]
    fn test_amount_addition_promotes_to_float() {
        assert_eq!(Amount::Int(3) + Amount::Int(10), Amount::Int(13));
        assert_eq!(Amount::Int(3) + Amount::Float(0.5), Amount::Float(3.5));
        assert_eq!(
            Amount::Int(i128::MAX) + Amount::Int(1),
            Amount::Float(i128::MAX as f64 + 1.0)
        );

        let mut total = Amount::ZERO;
        total += Amount::Float(2.5);
        total += Amount::Float(2.5);
        assert_eq!(total.to_string(), "5.0");
    }

    #[test]
    fn test_amount_keeps_u64_range_exact() {
        let max = Amount::from_json(&json!(u64::MAX)).unwrap();
        assert_eq!(max, Amount::Int(u64::MAX.into()));
        assert_eq!((max + Amount::Int(1)).to_string(), "18446744073709551616");
        assert_eq!(
            Amount::from_json(&json!(i64::MIN)),
            Some(Amount::Int(i64::MIN.into()))
        );
    }

    #[test]
    fn test_amount_from_json_rejects_non_numbers() {
        assert_eq!(Amount::from_json(&json!(7)), Some(Amount::Int(7)));
        assert_eq!(Amount::from_json(&json!(1.25)), Some(Amount::Float(1.25)));
        assert_eq!(Amount::from_json(&json!("7")), None);
        assert_eq!(Amount::from_json(&json!(null)), None);
    }

    #[test]
    fn test_company_id_ordering() {
        let mut ids = vec![
            Some(CompanyId::Text("b".into())),
            None,
            Some(CompanyId::Float(2.5)),
            Some(CompanyId::Text("a".into())),
            Some(CompanyId::Int(3)),
            Some(CompanyId::Int(1)),
        ];
        ids.sort_by(|a, b| CompanyId::compare_missing_last(a.as_ref(), b.as_ref()));

        let rendered: Vec<String> = ids
            .iter()
            .map(|id| id.as_ref().map_or("-".to_string(), ToString::to_string))
            .collect();
        assert_eq!(rendered, ["1", "2.5", "3", "a", "b", "-"]);
    }

    #[test]
    fn test_int_float_comparison_is_exact() {
        let max = CompanyId::Int(i64::MAX.into());
        let below = CompanyId::Int((i64::MAX - 1).into());
        let two_pow_63 = CompanyId::Float(9223372036854775808.0);

        assert_eq!(below.compare(&max), Ordering::Less);
        assert_eq!(max.compare(&two_pow_63), Ordering::Less);
        assert_eq!(below.compare(&two_pow_63), Ordering::Less);
        assert_eq!(two_pow_63.compare(&max), Ordering::Greater);
        assert_eq!(
            CompanyId::Int(9223372036854775808).compare(&two_pow_63),
            Ordering::Equal
        );

        assert_eq!(CompanyId::Int(2).compare(&CompanyId::Float(2.5)), Ordering::Less);
        assert_eq!(CompanyId::Int(3).compare(&CompanyId::Float(2.5)), Ordering::Greater);
        assert_eq!(CompanyId::Int(-3).compare(&CompanyId::Float(-2.5)), Ordering::Less);
        assert_eq!(CompanyId::Int(-2).compare(&CompanyId::Float(-2.5)), Ordering::Greater);
        assert_eq!(CompanyId::Int(0).compare(&CompanyId::Float(-0.0)), Ordering::Equal);
    }

    #[test]
    fn test_join_key_equates_integral_floats_only() {
        assert_eq!(CompanyId::Int(1).join_key(), CompanyId::Float(1.0).join_key());
        assert_ne!(CompanyId::Int(1).join_key(), CompanyId::Text("1".into()).join_key());
        assert_ne!(CompanyId::Float(1.5).join_key(), CompanyId::Int(1).join_key());
        assert_ne!(
            CompanyId::Int(u64::MAX.into()).join_key(),
            CompanyId::Int((u64::MAX - 1).into()).join_key()
        );
    }

    #[test]
    fn test_company_id_from_json() {
        assert!(CompanyId::from_json(&json!(true)).is_none());
        assert!(CompanyId::from_json(&json!([1])).is_none());
        assert_eq!(
            CompanyId::from_json(&json!("acme")).map(|id| id.to_string()),
            Some("acme".to_string())
        );
        assert_eq!(
            CompanyId::from_json(&json!(u64::MAX)).map(|id| id.to_string()),
            Some("18446744073709551615".to_string())
        );
    }
}
