use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A person responsible at a voting center. Owned by exactly one center.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub designation: String,
    pub mobile: String,
}

impl Person {
    /// Blank row with a fresh id, as created by the "add person" form action.
    pub fn blank() -> Self {
        Self {
            id: new_id(),
            name: String::new(),
            designation: String::new(),
            mobile: String::new(),
        }
    }

    pub fn set(&mut self, field: PersonField, value: String) {
        match field {
            PersonField::Name => self.name = value,
            PersonField::Designation => self.designation = value,
            PersonField::Mobile => self.mobile = value,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EmergencyContact {
    pub name: String,
    pub mobile: String,
}

/// Committed voting center record. Field names match the backup file format.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VotingCenter {
    pub id: String,
    pub center_number: String,
    pub name: String,
    #[serde(default)]
    pub booth_count: String,
    #[serde(default)]
    pub voter_count: String,
    #[serde(default)]
    pub room_location: String,
    #[serde(default)]
    pub location_link: String,
    #[serde(default)]
    pub important_persons: Vec<Person>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CenterField {
    Number,
    Name,
    Booths,
    Voters,
    Room,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PersonField {
    Name,
    Designation,
    Mobile,
}

/// In-progress edit of a center. Only `commit` turns it into a `VotingCenter`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CenterDraft {
    pub id: String,
    pub is_new: bool,
    pub center_number: String,
    pub name: String,
    pub booth_count: String,
    pub voter_count: String,
    pub room_location: String,
    pub location_link: String,
    pub persons: Vec<Person>,
}

impl CenterDraft {
    pub fn new_center() -> Self {
        Self {
            id: new_id(),
            is_new: true,
            ..Self::default()
        }
    }

    pub fn from_center(center: &VotingCenter) -> Self {
        Self {
            id: center.id.clone(),
            is_new: false,
            center_number: center.center_number.clone(),
            name: center.name.clone(),
            booth_count: center.booth_count.clone(),
            voter_count: center.voter_count.clone(),
            room_location: center.room_location.clone(),
            location_link: center.location_link.clone(),
            persons: center.important_persons.clone(),
        }
    }

    pub fn set(&mut self, field: CenterField, value: String) {
        match field {
            CenterField::Number => self.center_number = value,
            CenterField::Name => self.name = value,
            CenterField::Booths => self.booth_count = value,
            CenterField::Voters => self.voter_count = value,
            CenterField::Room => self.room_location = value,
            CenterField::Link => self.location_link = value,
        }
    }

    /// Adds a blank person row and returns its id.
    pub fn add_person(&mut self) -> String {
        let person = Person::blank();
        let id = person.id.clone();
        self.persons.push(person);
        id
    }

    /// Returns false when no person with `person_id` is in the draft.
    pub fn update_person(&mut self, person_id: &str, field: PersonField, value: String) -> bool {
        match self.persons.iter_mut().find(|p| p.id == person_id) {
            Some(person) => {
                person.set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn remove_person(&mut self, person_id: &str) -> bool {
        let before = self.persons.len();
        self.persons.retain(|p| p.id != person_id);
        self.persons.len() != before
    }

    /// Validates the draft and converts it into a committed record.
    ///
    /// The number may only be left blank when the caller renumbers the list
    /// right after committing.
    pub fn commit(&self, number_required: bool) -> Result<VotingCenter, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if number_required && self.center_number.trim().is_empty() {
            return Err(ValidationError::MissingNumber);
        }
        Ok(VotingCenter {
            id: self.id.clone(),
            center_number: self.center_number.clone(),
            name: self.name.clone(),
            booth_count: self.booth_count.clone(),
            voter_count: self.voter_count.clone(),
            room_location: self.room_location.clone(),
            location_link: self.location_link.clone(),
            important_persons: self.persons.clone(),
        })
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Rewrites every display number as its 1-based position, zero-padded to two digits.
pub fn renumber(centers: &mut [VotingCenter]) {
    for (index, center) in centers.iter_mut().enumerate() {
        center.center_number = format!("{:02}", index + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(id: &str, number: &str, name: &str) -> VotingCenter {
        VotingCenter {
            id: id.to_string(),
            center_number: number.to_string(),
            name: name.to_string(),
            booth_count: String::new(),
            voter_count: String::new(),
            room_location: String::new(),
            location_link: String::new(),
            important_persons: vec![],
        }
    }

    #[test]
    fn test_commit_rejects_blank_name() {
        let mut draft = CenterDraft::new_center();
        draft.set(CenterField::Number, "05".to_string());
        draft.set(CenterField::Name, "   ".to_string());
        assert_eq!(draft.commit(true), Err(ValidationError::MissingName));
    }

    #[test]
    fn test_commit_number_only_required_without_renumbering() {
        let mut draft = CenterDraft::new_center();
        draft.set(CenterField::Name, "Site A".to_string());
        assert_eq!(draft.commit(true), Err(ValidationError::MissingNumber));

        let committed = draft.commit(false).expect("number optional when renumbering");
        assert_eq!(committed.name, "Site A");
        assert_eq!(committed.id, draft.id);
    }

    #[test]
    fn test_person_rows_are_addressed_by_id() {
        let mut draft = CenterDraft::new_center();
        let first = draft.add_person();
        let second = draft.add_person();
        assert_ne!(first, second);

        assert!(draft.update_person(&second, PersonField::Mobile, "017-000".to_string()));
        assert!(!draft.update_person("missing", PersonField::Name, "x".to_string()));
        assert_eq!(draft.persons[1].mobile, "017-000");
        assert!(draft.persons[0].mobile.is_empty());

        assert!(draft.remove_person(&first));
        assert!(!draft.remove_person(&first));
        assert_eq!(draft.persons.len(), 1);
        assert_eq!(draft.persons[0].id, second);
    }

    #[test]
    fn test_draft_does_not_alias_committed_record() {
        let mut original = center("c1", "01", "Site A");
        original.important_persons.push(Person {
            id: "p1".to_string(),
            name: "Rafiq".to_string(),
            designation: "Commander".to_string(),
            mobile: "01700000000".to_string(),
        });

        let mut draft = CenterDraft::from_center(&original);
        draft.update_person("p1", PersonField::Name, "Changed".to_string());
        draft.set(CenterField::Name, "Site Z".to_string());

        assert_eq!(original.important_persons[0].name, "Rafiq");
        assert_eq!(original.name, "Site A");
        assert!(!draft.is_new);
    }

    #[test]
    fn test_renumber_is_contiguous_and_padded() {
        let mut centers: Vec<VotingCenter> = (0..11)
            .map(|i| center(&format!("c{i}"), "x", &format!("Site {i}")))
            .collect();
        renumber(&mut centers);
        assert_eq!(centers[0].center_number, "01");
        assert_eq!(centers[9].center_number, "10");
        assert_eq!(centers[10].center_number, "11");
        assert_eq!(centers[10].name, "Site 10");
    }

    #[test]
    fn test_center_json_uses_camel_case_fields() {
        let json = serde_json::to_value(center("c1", "01", "Site A")).unwrap();
        assert_eq!(json["centerNumber"], "01");
        assert!(json.get("importantPersons").is_some());

        // Older exports may omit optional fields.
        let parsed: VotingCenter =
            serde_json::from_str(r#"{"id":"9","centerNumber":"09","name":"Old"}"#).unwrap();
        assert!(parsed.important_persons.is_empty());
        assert!(parsed.location_link.is_empty());
    }
}
