/// A boolean that distinguishes unset / false / true.
///
/// Plain `bool`/`Option<bool>` can't drive the inheritance merge rule in
/// `Record::merge_from` cleanly: we need to know whether *this* section set
/// the field at all, independent of whatever value it set it to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriState {
    pub value: bool,
    pub present: bool,
}

impl TriState {
    pub const fn unset() -> Self {
        Self {
            value: false,
            present: false,
        }
    }

    pub const fn of(value: bool) -> Self {
        Self {
            value,
            present: true,
        }
    }
}
