//! Public share links and hash routes.

/// `<base>#/view/<public_id>`, with `base` used verbatim.
pub fn share_url(base: &str, public_id: &str) -> String {
    format!("{}#/view/{}", base, public_id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Read-only view of a published form.
    View { public_id: String },
    /// Password recovery landing.
    Recovery,
    /// Dashboard or login, depending on the session.
    Home,
}

impl Route {
    /// Parses a location hash such as `#/view/<id>` or `#access_token=..&type=recovery`.
    pub fn parse(hash: &str) -> Route {
        let hash = hash.trim().trim_start_matches('#');
        if let Some(rest) = hash.strip_prefix("/view/") {
            let public_id = rest.split(['?', '/', '&']).next().unwrap_or_default();
            if !public_id.is_empty() {
                return Route::View {
                    public_id: public_id.to_string(),
                };
            }
        }
        let is_recovery = hash
            .trim_start_matches('/')
            .split('&')
            .any(|pair| pair == "type=recovery");
        if is_recovery {
            return Route::Recovery;
        }
        Route::Home
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_url_appends_view_route() {
        assert_eq!(
            share_url("https://example.org/checklist/", "abc"),
            "https://example.org/checklist/#/view/abc"
        );
    }

    #[test]
    fn routes_are_recognised() {
        assert_eq!(
            Route::parse("#/view/1f0e"),
            Route::View {
                public_id: "1f0e".into()
            }
        );
        assert_eq!(Route::parse("#/view/"), Route::Home);
        assert_eq!(
            Route::parse("#access_token=x&refresh_token=y&type=recovery"),
            Route::Recovery
        );
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("#/dashboard"), Route::Home);
    }
}
