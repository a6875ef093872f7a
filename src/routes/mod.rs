//! Client-side routes. The table below is the whole surface of the app:
//!
//! | Path             | Screen        | Guarded |
//! |------------------|---------------|---------|
//! | `/`              | Landing       | no      |
//! | `/auth`          | Auth          | no      |
//! | `/auth/callback` | Auth callback | no      |
//! | `/dashboard`     | Dashboard     | yes     |
//! | anything else    | redirect `/`  |         |

#[cfg(target_arch = "wasm32")]
mod auth;
#[cfg(target_arch = "wasm32")]
mod auth_callback;
#[cfg(target_arch = "wasm32")]
mod dashboard;
#[cfg(target_arch = "wasm32")]
mod landing;

pub mod paths {
    pub const LANDING: &str = "/";
    pub const AUTH: &str = "/auth";
    pub const AUTH_CALLBACK: &str = "/auth/callback";
    pub const DASHBOARD: &str = "/dashboard";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Auth,
    AuthCallback,
    Dashboard,
}

impl Screen {
    pub const ALL: [Screen; 4] = [
        Screen::Landing,
        Screen::Auth,
        Screen::AuthCallback,
        Screen::Dashboard,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Screen::Landing => paths::LANDING,
            Screen::Auth => paths::AUTH,
            Screen::AuthCallback => paths::AUTH_CALLBACK,
            Screen::Dashboard => paths::DASHBOARD,
        }
    }

    pub fn is_guarded(self) -> bool {
        matches!(self, Screen::Dashboard)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteMatch {
    Render(Screen),
    Redirect(&'static str),
}

/// Maps a pathname to its screen. Trailing slashes are ignored; unknown paths
/// redirect to the landing page.
pub fn resolve(pathname: &str) -> RouteMatch {
    let trimmed = pathname.trim();
    let normalized = match trimmed.trim_end_matches('/') {
        "" => paths::LANDING,
        path => path,
    };

    Screen::ALL
        .into_iter()
        .find(|screen| screen.path() == normalized)
        .map_or(RouteMatch::Redirect(paths::LANDING), RouteMatch::Render)
}

#[cfg(target_arch = "wasm32")]
pub(crate) use views::AppRoutes;

#[cfg(target_arch = "wasm32")]
mod views {
    use super::{auth::AuthPage, auth_callback::AuthCallbackPage, dashboard::DashboardPage, landing::LandingPage, paths};
    use crate::features::auth::RequireAuth;
    use leptos::prelude::*;
    use leptos_router::components::{Redirect, Route, Routes};
    use leptos_router::path;

    #[component]
    pub fn AppRoutes() -> impl IntoView {
        view! {
            <Routes fallback=|| view! { <Redirect path=paths::LANDING /> }>
                <Route path=path!("/") view=LandingPage />
                <Route path=path!("/auth") view=AuthPage />
                <Route path=path!("/auth/callback") view=AuthCallbackPage />
                <Route
                    path=path!("/dashboard")
                    view=|| view! { <RequireAuth><DashboardPage /></RequireAuth> }
                />
            </Routes>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_render_their_screen() {
        for screen in Screen::ALL {
            assert_eq!(resolve(screen.path()), RouteMatch::Render(screen));
        }
    }

    #[test]
    fn trailing_slash_is_ignored() {
        assert_eq!(resolve("/auth/"), RouteMatch::Render(Screen::Auth));
        assert_eq!(resolve(""), RouteMatch::Render(Screen::Landing));
    }

    #[test]
    fn unknown_paths_redirect_home() {
        assert_eq!(resolve("/settings"), RouteMatch::Redirect(paths::LANDING));
        assert_eq!(resolve("/dashboard/extra"), RouteMatch::Redirect(paths::LANDING));
    }

    #[test]
    fn only_dashboard_is_guarded() {
        let guarded: Vec<Screen> = Screen::ALL.into_iter().filter(|s| s.is_guarded()).collect();
        assert_eq!(guarded, vec![Screen::Dashboard]);
    }
}
