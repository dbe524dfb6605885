//! Access guard for protected pages.
//!
//! A pure, stateless decision evaluated on every navigation to a guarded
//! page. It holds no history and performs no side effects; the extractors in
//! [`crate::middleware::auth`] feed it the three signals and act on its
//! answer.

/// Which guarded page the navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardPage {
    /// The onboarding ("startup") page.
    Onboarding,
    /// Any other guarded page.
    Other,
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the requested page.
    Allow,
    /// Not signed in: back to the entry/login page.
    ToEntry,
    /// Signed in without a profile: finish onboarding first.
    ToOnboarding,
    /// Signed in with a profile but on the onboarding page: go to the
    /// dashboard.
    ToDashboard,
}

impl GuardDecision {
    /// The redirect target, or `None` when rendering may proceed.
    #[must_use]
    pub const fn redirect_target(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::ToEntry => Some("/"),
            Self::ToOnboarding => Some("/startup"),
            Self::ToDashboard => Some("/dashboard"),
        }
    }
}

/// Evaluate the guard for one navigation.
#[must_use]
pub const fn evaluate(authenticated: bool, has_profile: bool, page: GuardPage) -> GuardDecision {
    if !authenticated {
        return GuardDecision::ToEntry;
    }

    match (has_profile, page) {
        (false, GuardPage::Other) => GuardDecision::ToOnboarding,
        (true, GuardPage::Onboarding) => GuardDecision::ToDashboard,
        (false, GuardPage::Onboarding) | (true, GuardPage::Other) => GuardDecision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_always_goes_to_entry() {
        for has_profile in [false, true] {
            for page in [GuardPage::Onboarding, GuardPage::Other] {
                assert_eq!(evaluate(false, has_profile, page), GuardDecision::ToEntry);
            }
        }
    }

    #[test]
    fn test_no_profile_off_onboarding_redirects_to_onboarding() {
        assert_eq!(
            evaluate(true, false, GuardPage::Other),
            GuardDecision::ToOnboarding
        );
    }

    #[test]
    fn test_profile_on_onboarding_redirects_to_dashboard() {
        assert_eq!(
            evaluate(true, true, GuardPage::Onboarding),
            GuardDecision::ToDashboard
        );
    }

    #[test]
    fn test_matching_states_pass_through() {
        assert_eq!(evaluate(true, true, GuardPage::Other), GuardDecision::Allow);
        assert_eq!(
            evaluate(true, false, GuardPage::Onboarding),
            GuardDecision::Allow
        );
    }

    #[test]
    fn test_redirect_targets() {
        assert_eq!(GuardDecision::Allow.redirect_target(), None);
        assert_eq!(GuardDecision::ToEntry.redirect_target(), Some("/"));
        assert_eq!(GuardDecision::ToOnboarding.redirect_target(), Some("/startup"));
        assert_eq!(GuardDecision::ToDashboard.redirect_target(), Some("/dashboard"));
    }
}
