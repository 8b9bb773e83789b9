//! Sale form draft
//!
//! One tagged value replaces the pair of "new" / "editing" slots: a form is
//! either idle, filling in a new sale, or editing an existing one.

pub const MSG_DATE_REQUIRED: &str = "Data é obrigatória";
pub const MSG_AMOUNT_NOT_POSITIVE: &str = "Valor deve ser maior que zero";

/// Form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleDraft {
    /// Display date, `dd/mm/yyyy`
    pub date: String,
    /// `None` until the user types an amount
    pub amount: Option<f64>,
}

impl SaleDraft {
    pub fn new(date: impl Into<String>, amount: f64) -> Self {
        Self {
            date: date.into(),
            amount: Some(amount),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Draft {
    #[default]
    Idle,
    New(SaleDraft),
    Edit { id: i64, draft: SaleDraft },
}

impl Draft {
    pub fn fields(&self) -> Option<&SaleDraft> {
        match self {
            Self::Idle => None,
            Self::New(draft) | Self::Edit { draft, .. } => Some(draft),
        }
    }

    pub fn editing_id(&self) -> Option<i64> {
        match self {
            Self::Edit { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::New(_))
    }
}

/// Validation rules for the "new sale" form
///
/// Without a new draft the date is considered missing; the amount rule only
/// applies to a typed-in value.
pub fn validate_new_draft(draft: Option<&SaleDraft>) -> Vec<String> {
    let mut errors = Vec::new();
    if draft.is_none_or(|d| d.date.is_empty()) {
        errors.push(MSG_DATE_REQUIRED.to_string());
    }
    if let Some(amount) = draft.and_then(|d| d.amount)
        && amount <= 0.0
    {
        errors.push(MSG_AMOUNT_NOT_POSITIVE.to_string());
    }
    errors
}
