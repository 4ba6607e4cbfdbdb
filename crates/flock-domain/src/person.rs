//! Person records and the labels used to classify them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A member, visitor or leader as delivered by the data provider.
///
/// Dates stay in their raw textual form so a single malformed value can be
/// reported and skipped instead of rejecting the whole snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anniversary_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_id: Option<Uuid>,
    #[serde(default = "PersonRecord::default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl PersonRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            birth_date: None,
            anniversary_date: None,
            status: None,
            network: None,
            gender: None,
            scope_id: None,
            active: true,
            phone: None,
            email: None,
        }
    }

    pub fn with_birth_date(mut self, date: impl Into<String>) -> Self {
        self.birth_date = Some(date.into());
        self
    }

    pub fn with_anniversary_date(mut self, date: impl Into<String>) -> Self {
        self.anniversary_date = Some(date.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_scope(mut self, scope_id: Uuid) -> Self {
        self.scope_id = Some(scope_id);
        self
    }

    pub fn default_active() -> bool {
        true
    }

    /// Parsed status, `None` when missing or unrecognized.
    pub fn member_status(&self) -> Option<MemberStatus> {
        present(self.status.as_deref()).and_then(|label| label.parse().ok())
    }

    /// Parsed gender, `None` when missing or unrecognized.
    pub fn parsed_gender(&self) -> Option<Gender> {
        present(self.gender.as_deref()).and_then(|label| label.parse().ok())
    }
}

/// Returned when a label does not map onto any known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized label `{}`", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

/// Spiritual status buckets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MemberStatus {
    Visitor,
    NewConvert,
    Member,
    Leader,
    Discipler,
}

impl MemberStatus {
    pub const ALL: [MemberStatus; 5] = [
        MemberStatus::Visitor,
        MemberStatus::NewConvert,
        MemberStatus::Member,
        MemberStatus::Leader,
        MemberStatus::Discipler,
    ];
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MemberStatus::Visitor => "Visitor",
            MemberStatus::NewConvert => "New convert",
            MemberStatus::Member => "Member",
            MemberStatus::Leader => "Leader",
            MemberStatus::Discipler => "Discipler",
        };
        f.write_str(label)
    }
}

impl FromStr for MemberStatus {
    type Err = UnknownLabel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize_label(raw).as_str() {
            "visitor" | "visitante" => Ok(MemberStatus::Visitor),
            "new-convert" | "novo-convertido" | "convert" => Ok(MemberStatus::NewConvert),
            "member" | "membro" => Ok(MemberStatus::Member),
            "leader" | "lider" | "líder" => Ok(MemberStatus::Leader),
            "discipler" | "discipulador" => Ok(MemberStatus::Discipler),
            _ => Err(UnknownLabel(raw.to_string())),
        }
    }
}

/// Ministry networks a person can belong to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    Men,
    Women,
    Youth,
    Teens,
    Children,
}

impl Network {
    pub const ALL: [Network; 5] = [
        Network::Men,
        Network::Women,
        Network::Youth,
        Network::Teens,
        Network::Children,
    ];
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Network::Men => "Men",
            Network::Women => "Women",
            Network::Youth => "Youth",
            Network::Teens => "Teens",
            Network::Children => "Children",
        };
        f.write_str(label)
    }
}

impl FromStr for Network {
    type Err = UnknownLabel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize_label(raw).as_str() {
            "men" | "homens" => Ok(Network::Men),
            "women" | "mulheres" => Ok(Network::Women),
            "youth" | "jovens" => Ok(Network::Youth),
            "teens" | "adolescentes" => Ok(Network::Teens),
            "children" | "kids" | "criancas" | "crianças" => Ok(Network::Children),
            _ => Err(UnknownLabel(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = UnknownLabel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize_label(raw).as_str() {
            "male" | "m" | "masculino" => Ok(Gender::Male),
            "female" | "f" | "feminino" => Ok(Gender::Female),
            _ => Err(UnknownLabel(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_accept_aliases() {
        assert_eq!("New Convert".parse(), Ok(MemberStatus::NewConvert));
        assert_eq!("membro".parse(), Ok(MemberStatus::Member));
        assert_eq!("LÍDER".parse(), Ok(MemberStatus::Leader));
        assert!("elder".parse::<MemberStatus>().is_err());
    }

    #[test]
    fn blank_status_is_not_parsed() {
        let person = PersonRecord::new("Ana").with_status("   ");
        assert_eq!(person.member_status(), None);
    }

    #[test]
    fn record_deserializes_with_defaults() {
        let json = r#"{"id":"6f1c1d1e-9b1e-4a57-9d7e-0c7f3f1b2a10","name":"Ana","birth_date":null}"#;
        let person: PersonRecord = serde_json::from_str(json).expect("valid record");
        assert!(person.active);
        assert_eq!(person.birth_date, None);
        assert_eq!(person.member_status(), None);
    }
}
