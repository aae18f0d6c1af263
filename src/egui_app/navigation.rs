//! Navigation chrome: routes, active link, breadcrumbs and the mobile menu.

/// Pages of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page with the login modal
    Entry,
    /// Landing page with the login modal already open
    Login,
    Onboarding,
    Dashboard,
    Breakdown,
    Income,
    Transactions,
    Budgets,
    Settings,
}

impl Route {
    /// Links shown in the top navigation, in order
    pub const NAV_LINKS: [Route; 6] = [
        Route::Dashboard,
        Route::Breakdown,
        Route::Income,
        Route::Transactions,
        Route::Budgets,
        Route::Settings,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Entry => "/",
            Route::Login => "/?showLogin=true",
            Route::Onboarding => "/onboarding",
            Route::Dashboard => "/dashboard",
            Route::Breakdown => "/breakdown",
            Route::Income => "/income",
            Route::Transactions => "/transactions",
            Route::Budgets => "/budgets",
            Route::Settings => "/settings",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        match path {
            "/" => Some(Route::Entry),
            "/?showLogin=true" => Some(Route::Login),
            "/onboarding" => Some(Route::Onboarding),
            "/dashboard" => Some(Route::Dashboard),
            "/breakdown" => Some(Route::Breakdown),
            "/income" => Some(Route::Income),
            "/transactions" => Some(Route::Transactions),
            "/budgets" => Some(Route::Budgets),
            "/settings" => Some(Route::Settings),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Entry | Route::Login => "Home",
            Route::Onboarding => "Get Started",
            Route::Dashboard => "Dashboard",
            Route::Breakdown => "Breakdown",
            Route::Income => "Income",
            Route::Transactions => "Transactions",
            Route::Budgets => "Budgets",
            Route::Settings => "Settings",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Route::Entry | Route::Login | Route::Dashboard => "🏠",
            Route::Onboarding => "✨",
            Route::Breakdown => "📊",
            Route::Income => "💵",
            Route::Transactions => "📋",
            Route::Budgets => "📅",
            Route::Settings => "⚙",
        }
    }

    /// Pages that need a session token
    pub fn requires_auth(self) -> bool {
        !matches!(self, Route::Entry | Route::Login | Route::Onboarding)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub route: Route,
    pub active: bool,
}

/// Navigation bar state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    current: Route,
    menu_open: bool,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            current: Route::Entry,
            menu_open: false,
        }
    }
}

impl NavState {
    pub fn new(current: Route) -> Self {
        Self {
            current,
            menu_open: false,
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Follow a link. Always closes the mobile menu.
    pub fn navigate(&mut self, route: Route) {
        self.current = route;
        self.menu_open = false;
    }

    pub fn links(&self) -> Vec<NavLink> {
        Route::NAV_LINKS
            .iter()
            .map(|route| NavLink {
                route: *route,
                active: *route == self.current,
            })
            .collect()
    }

    /// Dashboard → current page, shown everywhere except the dashboard itself
    pub fn breadcrumbs(&self) -> Option<[Route; 2]> {
        if self.current == Route::Dashboard || !Route::NAV_LINKS.contains(&self.current) {
            return None;
        }
        Some([Route::Dashboard, self.current])
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Click outside both the toggle and the menu
    pub fn click_outside(&mut self) {
        self.menu_open = false;
    }
}
