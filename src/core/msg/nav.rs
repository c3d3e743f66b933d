use serde::{Deserialize, Serialize};

use crate::domain::navigation::{RouteParams, Target};

/// Navigator operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavMsg {
    Navigate { target: Target, params: RouteParams },
    Back,
    ToggleDrawer,
    /// Activate the drawer item under the cursor
    DrawerSelect,
}

impl NavMsg {
    pub fn to(target: impl Into<Target>) -> Self {
        NavMsg::Navigate {
            target: target.into(),
            params: RouteParams::default(),
        }
    }

    pub fn with_params(target: impl Into<Target>, params: RouteParams) -> Self {
        NavMsg::Navigate {
            target: target.into(),
            params,
        }
    }
}
