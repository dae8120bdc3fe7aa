//! Temperature scales and conversion

/// Temperature scale
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TempUnit {
    Kelvin,
    Celsius,
    #[default]
    Fahrenheit,
}

impl TempUnit {
    /// Parse the single-letter scale symbol (`K`, `C` or `F`).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "K" => Some(TempUnit::Kelvin),
            "C" => Some(TempUnit::Celsius),
            "F" => Some(TempUnit::Fahrenheit),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TempUnit::Kelvin => "K",
            TempUnit::Celsius => "C",
            TempUnit::Fahrenheit => "F",
        }
    }

    /// Suffix appended to a displayed value (`°F`, `°C`, `K`).
    pub fn suffix(self) -> &'static str {
        match self {
            TempUnit::Kelvin => "K",
            TempUnit::Celsius => "°C",
            TempUnit::Fahrenheit => "°F",
        }
    }

    /// Next scale in the display cycle F -> C -> K -> F.
    pub fn cycle(self) -> Self {
        match self {
            TempUnit::Fahrenheit => TempUnit::Celsius,
            TempUnit::Celsius => TempUnit::Kelvin,
            TempUnit::Kelvin => TempUnit::Fahrenheit,
        }
    }
}

/// Convert `value` from one scale to another.
pub fn convert(value: f64, from: TempUnit, to: TempUnit) -> f64 {
    use TempUnit::*;
    match (from, to) {
        (Kelvin, Fahrenheit) => value * (9.0 / 5.0) - 459.67,
        (Kelvin, Celsius) => value - 273.15,
        (Celsius, Kelvin) => value + 273.15,
        (Celsius, Fahrenheit) => value * (9.0 / 5.0) + 32.0,
        (Fahrenheit, Kelvin) => (value + 459.67) * (5.0 / 9.0),
        (Fahrenheit, Celsius) => (value - 32.0) * (5.0 / 9.0),
        (Kelvin, Kelvin) | (Celsius, Celsius) | (Fahrenheit, Fahrenheit) => value,
    }
}

/// Convert using scale symbols. Unknown symbols leave the value unchanged.
pub fn convert_symbols(value: f64, from: &str, to: &str) -> f64 {
    match (TempUnit::from_symbol(from), TempUnit::from_symbol(to)) {
        (Some(from), Some(to)) => convert(value, from, to),
        _ => value,
    }
}
