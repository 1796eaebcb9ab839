//! Promo code validation

/// Set of accepted promo codes, stored upper-cased
#[derive(Debug, Clone, Default)]
pub struct PromoCodes {
    codes: Vec<String>,
}

impl PromoCodes {
    pub fn new(codes: Vec<String>) -> Self {
        Self {
            codes: codes
                .into_iter()
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    /// Case-insensitive membership check; a missing or blank code is never valid
    pub fn is_valid(&self, code: Option<&str>) -> bool {
        match code.map(str::trim) {
            Some(code) if !code.is_empty() => {
                let code = code.to_uppercase();
                self.codes.iter().any(|c| *c == code)
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
