use std::fmt::Display;
use std::io::Write;

use crate::result::Result;
use crate::schema::InfoRecord;

pub const NOT_AVAILABLE: &str = "N/A";

// absent => "N/A"; the only place a missing field turns into text
pub fn or_na<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

// floats keep a trailing ".0" when whole (189.0, not 189)
fn number(value: Option<f64>) -> String {
    or_na(value.map(|v| {
        if v.fract() == 0.0 && v.abs() < 1e16 {
            format!("{v:.1}")
        } else {
            v.to_string()
        }
    }))
}

/// Write the "=== Stock Information ===" section.
pub fn write_info<W: Write>(out: &mut W, info: &InfoRecord) -> Result<()> {
    writeln!(out, "\n=== Stock Information ===")?;
    writeln!(out, "Name: {}", or_na(info.long_name.as_deref()))?;
    writeln!(out, "Sector: {}", or_na(info.sector.as_deref()))?;
    writeln!(out, "Current Price: {} USD", number(info.current_price))?;
    writeln!(out, "Market Cap: {} USD", or_na(info.market_cap))?;
    writeln!(out, "52-Week High: {} USD", number(info.fifty_two_week_high))?;
    writeln!(out, "52-Week Low: {} USD", number(info.fifty_two_week_low))?;
    writeln!(out, "Dividend Yield: {}", number(info.dividend_yield))?;
    Ok(())
}
