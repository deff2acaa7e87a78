use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub brand: &'static str,
    pub items: Vec<NavItem>,
}

/// Sidebar of the admin panel.
pub fn admin_navigation() -> Navigation {
    Navigation {
        brand: "Client Management",
        items: vec![
            NavItem {
                label: "Dashboard",
                href: "/admin",
                icon: "home",
            },
            NavItem {
                label: "Leads",
                href: "/admin/leads",
                icon: "user-plus",
            },
            NavItem {
                label: "Client Info",
                href: "/admin/clientInfo",
                icon: "warehouse",
            },
        ],
    }
}
