use serde::{Deserialize, Serialize};

/// One combo platter offering on the menu.
///
/// Only built through [`crate::core::item_check::check_item`] (or the
/// `TryFrom<&Value>` impl next to it), so a `MenuItem` in hand is always valid:
/// non-empty name, at least one item, a finite non-negative price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub items: Vec<String>,
    pub price: f64,
    #[serde(rename = "isVeg")]
    pub is_veg: bool,
}

impl MenuItem {
    pub fn diet(&self) -> Diet {
        Diet::from(self.is_veg)
    }

    /// `"{NAME} (Veg|Non-Veg) - Items: a, b - Rs.250.00"`
    pub fn description(&self) -> String {
        format!(
            "{} ({}) - Items: {} - Rs.{}",
            self.name.to_uppercase(),
            if self.is_veg { "Veg" } else { "Non-Veg" },
            self.items.join(", "),
            format_fixed_price(self.price)
        )
    }

    /// Case-insensitive substring match against the name or any sub-item.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .items
                .iter()
                .any(|item| item.to_lowercase().contains(&needle))
    }
}

/// Three-way reading of an `isVeg` field. Anything other than exactly `true`
/// or exactly `false` is `Unspecified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diet {
    Veg,
    NonVeg,
    Unspecified,
}

impl From<bool> for Diet {
    fn from(is_veg: bool) -> Self {
        if is_veg {
            Diet::Veg
        } else {
            Diet::NonVeg
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuStats {
    pub total_count: usize,
    pub veg_count: usize,
    pub non_veg_count: usize,
    pub average_price: String,
    pub cheapest: f64,
    pub costliest: f64,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Price with exactly two decimal digits. Exact midpoints round away from
/// zero (`0.125` -> `"0.13"`); `{:.2}` alone would round them to even.
pub fn format_fixed_price(price: f64) -> String {
    // 40 位小數足以分辨真正的 .xx5 與鄰近值
    let exact = format!("{:.40}", price.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = whole.bytes().chain(fraction.bytes().take(2)).collect();
    while digits.len() < whole.len() + 2 {
        digits.push(b'0');
    }

    if fraction.as_bytes().get(2).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - 2;
    let sign = if price < 0.0 { "-" } else { "" };
    let integer: String = digits[..split].iter().map(|&d| d as char).collect();
    let cents: String = digits[split..].iter().map(|&d| d as char).collect();
    format!("{}{}.{}", sign, integer, cents)
}

/// Price in its shortest natural form: `250` stays `250`, `99.5` stays `99.5`.
pub fn format_plain_price(price: f64) -> String {
    format!("{}", price)
}
