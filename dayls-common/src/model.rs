//! Day-schedule document model
//!
//! Mirrors the structure the scheduling form submits: one document per
//! calendar date holding hourly activity blocks and instructor movement
//! events. Wire field names are camelCase, matching the form payload.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ordering::SchedulePosition;

/// One saved day: hourly activity blocks plus instructor movements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    #[serde(default)]
    pub hourly_blocks: Vec<HourlyBlock>,
    #[serde(default)]
    pub instructors: Vec<InstructorEvent>,
}

/// An hourly block: a time range holding one or more activities
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyBlock {
    pub id: Uuid,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl SchedulePosition for HourlyBlock {
    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn end_time(&self) -> Option<&str> {
        Some(&self.end_time)
    }
}

/// One activity within an hourly block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub performers: Vec<PerformerEntry>,
    #[serde(default)]
    pub age_group: Option<AgeGroup>,
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default)]
    pub room_name: Room,
}

impl Activity {
    /// Class-type code: first letter of the age-group code plus the level
    /// code (`JR` + `2` becomes `J2`); absent parts contribute nothing.
    pub fn class_type(&self) -> String {
        let mut code = String::new();
        if let Some(age) = self.age_group {
            // Age-group codes are ASCII, so the first byte is the first letter
            code.push_str(&age.code()[..1]);
        }
        if let Some(level) = self.level {
            code.push_str(level.code());
        }
        code
    }
}

/// A performer's participation in one activity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformerEntry {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub roles: String,
    #[serde(default, rename = "type")]
    pub kind: Option<PerformerKind>,
    #[serde(default)]
    pub notes: String,
}

/// An instructor movement (entered/exited the floor at a time slot)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorEvent {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<InstructorKind>,
    #[serde(default)]
    pub time_slot: String,
    #[serde(default)]
    pub status: Option<InstructorStatus>,
}

impl SchedulePosition for InstructorEvent {
    fn start_time(&self) -> &str {
        &self.time_slot
    }

    fn end_time(&self) -> Option<&str> {
        None
    }
}

/// Age groups offered by the academy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "JR")]
    Junior,
    #[serde(rename = "TN")]
    Teen,
    #[serde(rename = "SR")]
    Senior,
    #[serde(rename = "AD")]
    Adult,
}

impl AgeGroup {
    /// Parse from the stored two-letter code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "JR" => Some(AgeGroup::Junior),
            "TN" => Some(AgeGroup::Teen),
            "SR" => Some(AgeGroup::Senior),
            "AD" => Some(AgeGroup::Adult),
            _ => None,
        }
    }

    /// Stored two-letter code
    pub fn code(&self) -> &'static str {
        match self {
            AgeGroup::Junior => "JR",
            AgeGroup::Teen => "TN",
            AgeGroup::Senior => "SR",
            AgeGroup::Adult => "AD",
        }
    }

    /// Human-readable display name
    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Junior => "Junior",
            AgeGroup::Teen => "Teen",
            AgeGroup::Senior => "Senior",
            AgeGroup::Adult => "Adult",
        }
    }

    /// All variants, for selection controls
    pub fn all() -> &'static [AgeGroup] {
        &[
            AgeGroup::Junior,
            AgeGroup::Teen,
            AgeGroup::Senior,
            AgeGroup::Adult,
        ]
    }
}

/// Class levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    /// Core curriculum
    #[serde(rename = "C")]
    Core,
}

impl Level {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Level::One),
            "2" => Some(Level::Two),
            "3" => Some(Level::Three),
            "C" => Some(Level::Core),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Level::One => "1",
            Level::Two => "2",
            Level::Three => "3",
            Level::Core => "C",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Level::One => "1",
            Level::Two => "2",
            Level::Three => "3",
            Level::Core => "C (Core)",
        }
    }

    pub fn all() -> &'static [Level] {
        &[Level::One, Level::Two, Level::Three, Level::Core]
    }
}

/// Rooms at the academy location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Room {
    #[serde(rename = "JAM")]
    Jam,
    #[serde(rename = "ACC")]
    Acceleration,
}

impl Room {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "JAM" => Some(Room::Jam),
            "ACC" => Some(Room::Acceleration),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Room::Jam => "JAM",
            Room::Acceleration => "ACC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Room::Jam => "JAM Room",
            Room::Acceleration => "Acceleration Room",
        }
    }

    pub fn all() -> &'static [Room] {
        &[Room::Jam, Room::Acceleration]
    }
}

impl Default for Room {
    /// New activities start in the JAM Room
    fn default() -> Self {
        Room::Jam
    }
}

/// How a performer attended an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformerKind {
    #[serde(rename = "Class")]
    Class,
    #[serde(rename = "Not Class")]
    NotClass,
    #[serde(rename = "Trial")]
    Trial,
}

impl PerformerKind {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Class" => Some(PerformerKind::Class),
            "Not Class" => Some(PerformerKind::NotClass),
            "Trial" => Some(PerformerKind::Trial),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PerformerKind::Class => "Class",
            PerformerKind::NotClass => "Not Class",
            PerformerKind::Trial => "Trial",
        }
    }

    pub fn all() -> &'static [PerformerKind] {
        &[
            PerformerKind::Class,
            PerformerKind::NotClass,
            PerformerKind::Trial,
        ]
    }
}

/// Instructor roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstructorKind {
    Teacher,
    Intern,
}

impl InstructorKind {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Teacher" => Some(InstructorKind::Teacher),
            "Intern" => Some(InstructorKind::Intern),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            InstructorKind::Teacher => "Teacher",
            InstructorKind::Intern => "Intern",
        }
    }
}

/// Direction of an instructor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstructorStatus {
    Entered,
    Exited,
}

impl InstructorStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Entered" => Some(InstructorStatus::Entered),
            "Exited" => Some(InstructorStatus::Exited),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            InstructorStatus::Entered => "Entered",
            InstructorStatus::Exited => "Exited",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::sorted_by_schedule;

    fn activity(age: Option<AgeGroup>, level: Option<Level>) -> Activity {
        Activity {
            id: Uuid::new_v4(),
            name: "Band Lab".to_string(),
            notes: String::new(),
            performers: vec![],
            age_group: age,
            level,
            room_name: Room::Jam,
        }
    }

    #[test]
    fn test_class_type_derivation() {
        assert_eq!(
            activity(Some(AgeGroup::Junior), Some(Level::Two)).class_type(),
            "J2"
        );
        assert_eq!(
            activity(Some(AgeGroup::Teen), Some(Level::Core)).class_type(),
            "TC"
        );
        assert_eq!(activity(Some(AgeGroup::Adult), None).class_type(), "A");
        assert_eq!(activity(None, Some(Level::One)).class_type(), "1");
        assert_eq!(activity(None, None).class_type(), "");
    }

    #[test]
    fn test_age_group_code_round_trip() {
        for age in AgeGroup::all() {
            assert_eq!(AgeGroup::from_code(age.code()), Some(*age));
        }
        assert_eq!(AgeGroup::from_code("XX"), None);
    }

    #[test]
    fn test_level_code_round_trip() {
        for level in Level::all() {
            assert_eq!(Level::from_code(level.code()), Some(*level));
        }
        assert_eq!(Level::from_code("4"), None);
    }

    #[test]
    fn test_room_code_round_trip() {
        for room in Room::all() {
            assert_eq!(Room::from_code(room.code()), Some(*room));
        }
        assert_eq!(Room::default(), Room::Jam);
    }

    #[test]
    fn test_performer_kind_codes() {
        assert_eq!(PerformerKind::from_code("Not Class"), Some(PerformerKind::NotClass));
        assert_eq!(PerformerKind::NotClass.code(), "Not Class");
    }

    #[test]
    fn test_schedule_wire_format() {
        let json = serde_json::json!({
            "hourlyBlocks": [{
                "id": "8c5f1b8e-6f6a-4bb4-9fd2-3f1a2b3c4d5e",
                "startTime": "11:00 AM",
                "endTime": "12:00 PM",
                "activities": [{
                    "id": "0d9e8f7a-1b2c-3d4e-5f60-718293a4b5c6",
                    "name": "Band Lab",
                    "notes": "",
                    "performers": [{
                        "id": "d4c3b2a1-0f9e-8d7c-6b5a-493827161504",
                        "name": "Ayaan Raj",
                        "roles": "Drums",
                        "type": "Class",
                        "notes": ""
                    }],
                    "ageGroup": "JR",
                    "level": "2",
                    "roomName": "JAM"
                }]
            }],
            "instructors": [{
                "id": "11111111-2222-3333-4444-555555555555",
                "name": "Priya",
                "type": "Teacher",
                "timeSlot": "10:00 AM",
                "status": "Entered"
            }]
        });

        let schedule: DaySchedule = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(schedule.hourly_blocks.len(), 1);
        let block = &schedule.hourly_blocks[0];
        assert_eq!(block.start_time, "11:00 AM");
        let activity = &block.activities[0];
        assert_eq!(activity.age_group, Some(AgeGroup::Junior));
        assert_eq!(activity.class_type(), "J2");
        assert_eq!(activity.performers[0].kind, Some(PerformerKind::Class));
        assert_eq!(schedule.instructors[0].status, Some(InstructorStatus::Entered));

        // Serializing keeps the camelCase wire names
        let back = serde_json::to_value(&schedule).unwrap();
        assert_eq!(back["hourlyBlocks"][0]["startTime"], "11:00 AM");
        assert_eq!(back["hourlyBlocks"][0]["activities"][0]["roomName"], "JAM");
        assert_eq!(back["instructors"][0]["timeSlot"], "10:00 AM");
    }

    #[test]
    fn test_missing_fields_default() {
        let schedule: DaySchedule = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(schedule.hourly_blocks.is_empty());
        assert!(schedule.instructors.is_empty());

        let activity: Activity = serde_json::from_value(serde_json::json!({
            "id": "8c5f1b8e-6f6a-4bb4-9fd2-3f1a2b3c4d5e"
        }))
        .unwrap();
        assert_eq!(activity.room_name, Room::Jam);
        assert_eq!(activity.age_group, None);
    }

    #[test]
    fn test_blocks_order_by_schedule() {
        let mk = |start: &str, end: &str| HourlyBlock {
            id: Uuid::new_v4(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            activities: vec![],
        };
        let blocks = vec![
            mk("2:00 PM", "3:00 PM"),
            mk("11:00 AM", "12:00 PM"),
            mk("11:00 AM", "11:30 AM"),
        ];
        let ordered = sorted_by_schedule(&blocks);
        assert_eq!(ordered[0].end_time, "11:30 AM");
        assert_eq!(ordered[1].end_time, "12:00 PM");
        assert_eq!(ordered[2].start_time, "2:00 PM");
    }
}
