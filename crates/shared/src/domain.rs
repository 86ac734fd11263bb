use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);
    };
}

id_newtype!(AgentId);

/// Top-level UI mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Landing,
    Loading,
    Dashboard,
}

impl Screen {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Loading => "loading",
            Self::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dashboard panel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewId {
    #[default]
    Dashboard,
    Neural,
    Mesh,
    Sigma,
}

impl ViewId {
    pub const ALL: [ViewId; 4] = [Self::Dashboard, Self::Neural, Self::Mesh, Self::Sigma];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Neural => "neural",
            Self::Mesh => "mesh",
            Self::Sigma => "sigma",
        }
    }

    /// Parses `raw`, falling back to [`ViewId::Dashboard`] for anything unknown.
    pub fn resolve(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewId {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|view| view.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownView(raw.to_string()))
    }
}

/// Navigation entry shown by the dashboard shell for each view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub view: ViewId,
    pub label: &'static str,
    pub description: &'static str,
}

pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem {
        view: ViewId::Dashboard,
        label: "Daedalus",
        description: "Consciousness Hub",
    },
    NavItem {
        view: ViewId::Neural,
        label: "Neural",
        description: "Substrate Layer",
    },
    NavItem {
        view: ViewId::Mesh,
        label: "EchoNode",
        description: "Mesh Network",
    },
    NavItem {
        view: ViewId::Sigma,
        label: "Σ-Matrix",
        description: "Ethics Engine",
    },
];

pub fn nav_item(view: ViewId) -> &'static NavItem {
    // NAV_ITEMS is indexed in ViewId::ALL order.
    let index = ViewId::ALL
        .iter()
        .position(|candidate| *candidate == view)
        .unwrap_or(0);
    &NAV_ITEMS[index]
}

pub const LATENCY_FLOOR_MS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    /// Fraction in `[0, 1]`.
    pub network_health: f64,
    pub latency_ms: u32,
    /// Fraction in `[0, 1]`.
    pub ethical_compliance: f64,
}

impl SystemMetrics {
    pub const DEFAULT_NETWORK_HEALTH: f64 = 0.942;
    pub const DEFAULT_LATENCY_MS: u32 = 87;
    pub const DEFAULT_ETHICAL_COMPLIANCE: f64 = 0.968;

    pub fn is_within_range(&self) -> bool {
        (0.0..=1.0).contains(&self.network_health)
            && (0.0..=1.0).contains(&self.ethical_compliance)
            && self.latency_ms >= 1
    }

    /// Forces every field back into its legal range.
    pub fn clamped(self) -> Self {
        Self {
            network_health: clamp_unit(self.network_health),
            latency_ms: self.latency_ms.max(1),
            ethical_compliance: clamp_unit(self.ethical_compliance),
        }
    }
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self {
            network_health: Self::DEFAULT_NETWORK_HEALTH,
            latency_ms: Self::DEFAULT_LATENCY_MS,
            ethical_compliance: Self::DEFAULT_ETHICAL_COMPLIANCE,
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Orchestrator,
    Synthesizer,
    Analyst,
    Relay,
    Guardian,
}

impl AgentRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Orchestrator => "orchestrator",
            Self::Synthesizer => "synthesizer",
            Self::Analyst => "analyst",
            Self::Relay => "relay",
            Self::Guardian => "guardian",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub role: AgentRole,
    pub home_view: ViewId,
}

impl Agent {
    pub fn new(id: u32, name: impl Into<String>, role: AgentRole, home_view: ViewId) -> Self {
        Self {
            id: AgentId(id),
            name: name.into(),
            role,
            home_view,
        }
    }
}

/// Agents installed by system initialization, in roster order.
pub fn seed_agents() -> Vec<Agent> {
    vec![
        Agent::new(1, "Daedalus Prime", AgentRole::Orchestrator, ViewId::Dashboard),
        Agent::new(2, "Cortex Weaver", AgentRole::Synthesizer, ViewId::Neural),
        Agent::new(3, "Graph Oracle", AgentRole::Analyst, ViewId::Neural),
        Agent::new(4, "EchoNode Alpha", AgentRole::Relay, ViewId::Mesh),
        Agent::new(5, "EchoNode Beta", AgentRole::Relay, ViewId::Mesh),
        Agent::new(6, "Sigma Warden", AgentRole::Guardian, ViewId::Sigma),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_view_ids_case_insensitively() {
        assert_eq!("neural".parse::<ViewId>().expect("neural"), ViewId::Neural);
        assert_eq!(" SIGMA ".parse::<ViewId>().expect("sigma"), ViewId::Sigma);
        assert_eq!("Mesh".parse::<ViewId>().expect("mesh"), ViewId::Mesh);
    }

    #[test]
    fn rejects_unknown_view_id() {
        let err = "xyzzy".parse::<ViewId>().expect_err("unknown view");
        assert!(matches!(err, DomainError::UnknownView(raw) if raw == "xyzzy"));
    }

    #[test]
    fn resolve_falls_back_to_dashboard() {
        assert_eq!(ViewId::resolve("xyzzy"), ViewId::Dashboard);
        assert_eq!(ViewId::resolve(""), ViewId::Dashboard);
        assert_eq!(ViewId::resolve("mesh"), ViewId::Mesh);
    }

    #[test]
    fn nav_items_follow_view_order() {
        for view in ViewId::ALL {
            assert_eq!(nav_item(view).view, view);
        }
        assert_eq!(nav_item(ViewId::Sigma).label, "Σ-Matrix");
    }

    #[test]
    fn view_id_serializes_as_snake_case_tag() {
        let json = serde_json::to_string(&ViewId::Sigma).expect("serialize");
        assert_eq!(json, "\"sigma\"");
        let screen = serde_json::to_string(&Screen::Dashboard).expect("serialize");
        assert_eq!(screen, "\"dashboard\"");
    }

    #[test]
    fn clamped_metrics_are_within_range() {
        let wild = SystemMetrics {
            network_health: 1.7,
            latency_ms: 0,
            ethical_compliance: f64::NAN,
        };
        let clamped = wild.clamped();
        assert!(clamped.is_within_range());
        assert_eq!(clamped.network_health, 1.0);
        assert_eq!(clamped.latency_ms, 1);
        assert_eq!(clamped.ethical_compliance, 0.0);
    }

    #[test]
    fn seed_agents_have_unique_ids() {
        let agents = seed_agents();
        assert_eq!(agents.len(), 6);
        let mut ids: Vec<_> = agents.iter().map(|agent| agent.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }
}
