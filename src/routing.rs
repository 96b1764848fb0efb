//! View Routing
//!
//! The URL fragment is the sole routing input: parsing it yields a token,
//! and a pure reducer maps (token, identity, admin flag) to the next view.
//! Browser back/forward and reload replay the same transitions.

use crate::models::ChecklistInstance;

/// Recognized URL fragment tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentToken {
    New,
    Auth,
    History,
    Admin,
    Detail(String),
}

impl FragmentToken {
    /// Parse a raw fragment (with or without the leading `#`).
    /// Unrecognized tokens map to `New`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        match raw {
            "" => FragmentToken::New,
            "auth" => FragmentToken::Auth,
            "history" => FragmentToken::History,
            "admin" => FragmentToken::Admin,
            other => match other.strip_prefix("detail-") {
                Some(id) if !id.is_empty() => FragmentToken::Detail(id.to_string()),
                _ => FragmentToken::New,
            },
        }
    }

    /// Fragment string including the leading `#`.
    pub fn as_fragment(&self) -> String {
        match self {
            FragmentToken::New => "#".to_string(),
            FragmentToken::Auth => "#auth".to_string(),
            FragmentToken::History => "#history".to_string(),
            FragmentToken::Admin => "#admin".to_string(),
            FragmentToken::Detail(id) => format!("#detail-{id}"),
        }
    }
}

/// Closed set of view states
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    New,
    AuthForm,
    /// Login required before the wanted destination can be shown
    AuthRequired { wanted: FragmentToken },
    History,
    AdminHistory,
    Detail {
        checklist: ChecklistInstance,
        from_admin: bool,
    },
}

/// Outcome of resolving a token: either a view to show directly, or a
/// detail fetch that must complete first.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Show(ViewState),
    FetchDetail(String),
}

/// Pure reducer from (token, identity, admin flag) to the next step.
pub fn resolve(token: &FragmentToken, identity: Option<&str>, is_admin: bool) -> Resolution {
    match token {
        FragmentToken::New => Resolution::Show(ViewState::New),
        FragmentToken::Auth => Resolution::Show(ViewState::AuthForm),
        FragmentToken::History => {
            if identity.is_some() {
                Resolution::Show(ViewState::History)
            } else {
                Resolution::Show(ViewState::AuthRequired {
                    wanted: FragmentToken::History,
                })
            }
        }
        FragmentToken::Admin => {
            if identity.is_some() && is_admin {
                Resolution::Show(ViewState::AdminHistory)
            } else {
                Resolution::Show(ViewState::AuthRequired {
                    wanted: FragmentToken::Admin,
                })
            }
        }
        FragmentToken::Detail(id) => {
            if identity.is_some() {
                Resolution::FetchDetail(id.clone())
            } else {
                Resolution::Show(ViewState::AuthRequired {
                    wanted: token.clone(),
                })
            }
        }
    }
}

/// Whether a fetched detail view originated from the admin list: true iff
/// the viewer is an admin looking at someone else's checklist. Decides the
/// "back" target only.
pub fn detail_origin(viewer: &str, is_admin: bool, created_by: Option<&str>) -> bool {
    is_admin && created_by != Some(viewer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognizes_every_token() {
        assert_eq!(FragmentToken::parse(""), FragmentToken::New);
        assert_eq!(FragmentToken::parse("#"), FragmentToken::New);
        assert_eq!(FragmentToken::parse("#auth"), FragmentToken::Auth);
        assert_eq!(FragmentToken::parse("history"), FragmentToken::History);
        assert_eq!(FragmentToken::parse("#admin"), FragmentToken::Admin);
        assert_eq!(
            FragmentToken::parse("#detail-abc123"),
            FragmentToken::Detail("abc123".to_string())
        );
    }

    #[test]
    fn parse_maps_unrecognized_tokens_to_new() {
        assert_eq!(FragmentToken::parse("#settings"), FragmentToken::New);
        assert_eq!(FragmentToken::parse("detail-"), FragmentToken::New);
        assert_eq!(FragmentToken::parse("#details-x"), FragmentToken::New);
    }

    #[test]
    fn fragment_round_trips() {
        for token in [
            FragmentToken::New,
            FragmentToken::Auth,
            FragmentToken::History,
            FragmentToken::Admin,
            FragmentToken::Detail("checklist_42".to_string()),
        ] {
            assert_eq!(FragmentToken::parse(&token.as_fragment()), token);
        }
    }

    #[test]
    fn history_requires_an_identity() {
        assert_eq!(
            resolve(&FragmentToken::History, Some("a@x.com"), false),
            Resolution::Show(ViewState::History)
        );
        assert_eq!(
            resolve(&FragmentToken::History, None, false),
            Resolution::Show(ViewState::AuthRequired {
                wanted: FragmentToken::History
            })
        );
    }

    #[test]
    fn admin_requires_identity_and_admin_flag() {
        assert_eq!(
            resolve(&FragmentToken::Admin, Some("a@x.com"), true),
            Resolution::Show(ViewState::AdminHistory)
        );
        assert_eq!(
            resolve(&FragmentToken::Admin, Some("a@x.com"), false),
            Resolution::Show(ViewState::AuthRequired {
                wanted: FragmentToken::Admin
            })
        );
        assert_eq!(
            resolve(&FragmentToken::Admin, None, true),
            Resolution::Show(ViewState::AuthRequired {
                wanted: FragmentToken::Admin
            })
        );
    }

    #[test]
    fn detail_without_identity_resolves_to_auth_required() {
        let token = FragmentToken::parse("#detail-abc123");
        assert_eq!(
            resolve(&token, None, false),
            Resolution::Show(ViewState::AuthRequired { wanted: token.clone() })
        );
        assert_eq!(
            resolve(&token, Some("a@x.com"), false),
            Resolution::FetchDetail("abc123".to_string())
        );
    }

    #[test]
    fn detail_origin_points_back_to_the_right_list() {
        // Admin viewing someone else's sheet came from the admin list.
        assert!(detail_origin("admin@x.com", true, Some("a@x.com")));
        // Admin viewing their own sheet came from personal history.
        assert!(!detail_origin("admin@x.com", true, Some("admin@x.com")));
        // Non-admins always come from personal history.
        assert!(!detail_origin("a@x.com", false, Some("b@x.com")));
        // Missing creator counts as "someone else" for an admin.
        assert!(detail_origin("admin@x.com", true, None));
    }
}
