//! Access guard scenarios: where each kind of visitor ends up.

use gripen_web::middleware::{GuardDecision, GuardPage};
use gripen_web::middleware::guard::evaluate;

#[test]
fn test_signed_out_visitor_lands_on_entry() {
    for page in [GuardPage::Onboarding, GuardPage::Other] {
        assert_eq!(evaluate(false, false, page), GuardDecision::ToEntry);
        assert_eq!(evaluate(false, true, page), GuardDecision::ToEntry);
    }
}

#[test]
fn test_new_user_is_funneled_to_onboarding() {
    // Signed in without a profile, anywhere but onboarding itself.
    assert_eq!(
        evaluate(true, false, GuardPage::Other),
        GuardDecision::ToOnboarding
    );
    assert_eq!(evaluate(true, false, GuardPage::Onboarding), GuardDecision::Allow);
}

#[test]
fn test_onboarded_user_cannot_revisit_onboarding() {
    assert_eq!(
        evaluate(true, true, GuardPage::Onboarding),
        GuardDecision::ToDashboard
    );
    assert_eq!(evaluate(true, true, GuardPage::Other), GuardDecision::Allow);
}

#[test]
fn test_redirect_targets() {
    assert_eq!(GuardDecision::Allow.redirect_target(), None);
    assert_eq!(GuardDecision::ToEntry.redirect_target(), Some("/"));
    assert_eq!(GuardDecision::ToOnboarding.redirect_target(), Some("/startup"));
    assert_eq!(GuardDecision::ToDashboard.redirect_target(), Some("/dashboard"));
}
