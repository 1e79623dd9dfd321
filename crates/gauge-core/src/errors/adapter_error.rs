/// Page adapter errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    #[error("observed region not found after {attempts} attempts")]
    Unresolvable { attempts: u32 },
}
