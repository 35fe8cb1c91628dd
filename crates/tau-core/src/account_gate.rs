/// Status views that carry the enabled/configured gate fields.
pub trait GatedAccountStatus {
    fn account_id(&self) -> Option<&str>;
    fn enabled(&self) -> Option<bool>;
    fn configured(&self) -> Option<bool>;
}

/// Returns the account id only when the account is enabled and configured
/// (both strictly `true`) and the id is a non-empty string.
pub fn resolve_enabled_configured_account_id<S>(status: &S) -> Option<&str>
where
    S: GatedAccountStatus + ?Sized,
{
    if status.enabled() != Some(true) || status.configured() != Some(true) {
        return None;
    }
    status.account_id().filter(|account_id| !account_id.is_empty())
}
