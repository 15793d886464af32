//! Routing descriptor supplied by the navigation layer.

use serde::{Deserialize, Serialize};

/// Product family the experience belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Namespace {
    #[serde(rename = "HOUZZ")]
    Houzz,
    #[serde(rename = "HOUZZ_PRO")]
    HouzzPro,
    #[serde(rename = "IVY")]
    Ivy,
    #[serde(rename = "SITEDESIGNER")]
    SiteDesigner,
}

/// Deployment tier serving the experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    Production,
    #[serde(rename = "STGHOUZZ")]
    Staging,
    Houzz1,
    Houzz2,
    Houzz3,
    Dev,
}

/// Describes the experience being navigated to.
///
/// The two JSON fields are carried as opaque strings; nothing in OmniLog
/// parses them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDescriptor {
    /// Product family.
    #[serde(rename = "ns")]
    pub namespace: Namespace,
    /// Regional or brand variant within the namespace, e.g. `HOUZZ_UK`.
    #[serde(rename = "sitename", alias = "site_name")]
    pub site_name: String,
    /// Deployment tier.
    pub environment: Environment,
    /// Experience name.
    pub experience: String,
    /// Experience arguments as a JSON document.
    #[serde(
        rename = "experienceArgumentsJSON",
        alias = "experience_arguments_json",
        default = "empty_json_object"
    )]
    pub experience_arguments_json: String,
    /// Global directives as a JSON document.
    #[serde(
        rename = "globalDirectivesJSON",
        alias = "global_directives_json",
        default = "empty_json_object"
    )]
    pub global_directives_json: String,
}

fn empty_json_object() -> String {
    "{}".to_owned()
}

impl RoutingDescriptor {
    /// Creates a descriptor with empty argument and directive documents.
    #[must_use]
    pub fn new(
        namespace: Namespace,
        site_name: impl Into<String>,
        environment: Environment,
        experience: impl Into<String>,
    ) -> Self {
        Self {
            namespace,
            site_name: site_name.into(),
            environment,
            experience: experience.into(),
            experience_arguments_json: empty_json_object(),
            global_directives_json: empty_json_object(),
        }
    }

    #[must_use]
    pub fn with_arguments_json(mut self, json: impl Into<String>) -> Self {
        self.experience_arguments_json = json.into();
        self
    }

    #[must_use]
    pub fn with_directives_json(mut self, json: impl Into<String>) -> Self {
        self.global_directives_json = json.into();
        self
    }
}
