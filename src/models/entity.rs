use serde::{Deserialize, Serialize};

/// Records picked through the search pickers. Only the id is authoritative;
/// the rest is kept for display and for the certificate preview.
pub trait RelatedEntity {
    fn id(&self) -> i64;
    fn display_name(&self) -> String;
}

/// Police officer (requesting or submitting).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Officer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub service_number: String,
    #[serde(default)]
    pub station_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}

/// Internal user: approved botanist or finance officer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defendant {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
}

fn join_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim()).trim().to_string()
}

impl RelatedEntity for Officer {
    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        let name = join_name(&self.first_name, &self.last_name);
        if self.rank.trim().is_empty() {
            name
        } else {
            format!("{} {}", self.rank.trim(), name)
        }
    }
}

impl RelatedEntity for Station {
    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.trim().to_string()
    }
}

impl RelatedEntity for StaffMember {
    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }
}

impl RelatedEntity for Defendant {
    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }
}
