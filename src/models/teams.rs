use crate::utils::TabienError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub leader: String,
    pub leader_phone: String,
    pub members: Vec<String>,
}

impl Team {
    pub fn member(&self, index: usize) -> &str {
        self.members.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn members_joined(&self) -> String {
        self.members.join(", ")
    }
}

pub struct TeamRoster {
    pub teams: Vec<Team>,
}

impl TeamRoster {
    pub fn new() -> Self {
        let mut teams = Vec::new();

        teams.push(Team {
            id: "1".to_string(),
            name: "ชุดที่ 1".to_string(),
            leader: "ร.ต.อ.พิชิต  พัฒนาศูร".to_string(),
            leader_phone: "062-108-4116".to_string(),
            members: vec![
                "ร.ต.ต.ณรงค์  บุตรพรม".to_string(),
                "ด.ต.อดุลย์  ธงศรี".to_string(),
                "ส.ต.ท.ชนาธิป  ประหา".to_string(),
            ],
        });

        teams.push(Team {
            id: "2".to_string(),
            name: "ชุดที่ 2".to_string(),
            leader: "ร.ต.อ.สัญปกรณ์  นครเพชร".to_string(),
            leader_phone: "085-123-3219".to_string(),
            members: vec![
                "ร.ต.อ.สายสิทธิ์  มีศักดิ์".to_string(),
                "ด.ต.วุฒินันต์  ประเสริฐสังข์".to_string(),
                "ด.ต.จักรพันธ์  โพธิ์ศรีศาสตร์".to_string(),
            ],
        });

        teams.push(Team {
            id: "3".to_string(),
            name: "ชุดที่ 3".to_string(),
            leader: "ร.ต.อ.ปัญญา  วรรณชาติ".to_string(),
            leader_phone: "094-157-4741".to_string(),
            members: vec![
                "ร.ต.ท.ศักดิ์ศรี  สรรพวุธ".to_string(),
                "ร.ต.ต.ปราศภัยพาล  แก้วทรายขาว".to_string(),
                "ส.ต.ท.อนิรุทธ์  ทุหา".to_string(),
            ],
        });

        TeamRoster { teams }
    }

    /// Load a replacement roster from a JSON array of teams.
    pub fn from_json_file(path: &Path) -> Result<Self, TabienError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TabienError::RosterError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, TabienError> {
        let mut teams: Vec<Team> = serde_json::from_str(raw)
            .map_err(|e| TabienError::RosterError(format!("Invalid roster JSON: {}", e)))?;

        if teams.is_empty() {
            return Err(TabienError::RosterError("Roster has no teams".to_string()));
        }
        teams.sort_by(|a, b| Self::id_order(&a.id).cmp(&Self::id_order(&b.id)));
        if teams.windows(2).any(|pair| pair[0].id == pair[1].id) {
            return Err(TabienError::RosterError("Duplicate team id in roster".to_string()));
        }

        Ok(TeamRoster { teams })
    }

    /// Numeric ids first in numeric order, then the rest alphabetically.
    fn id_order(id: &str) -> (bool, u64, &str) {
        match id.parse::<u64>() {
            Ok(n) => (false, n, id),
            Err(_) => (true, 0, id),
        }
    }

    pub fn get(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == team_id)
    }
}

impl Default for TeamRoster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let roster = TeamRoster::new();
        assert_eq!(roster.teams.len(), 3);

        let team = roster.get("2").unwrap();
        assert_eq!(team.name, "ชุดที่ 2");
        assert_eq!(team.leader_phone, "085-123-3219");
        assert_eq!(team.member(0), "ร.ต.อ.สายสิทธิ์  มีศักดิ์");
        assert_eq!(team.member(3), "");
        assert!(roster.get("4").is_none());
    }

    #[test]
    fn test_members_joined() {
        let roster = TeamRoster::new();
        let team = roster.get("1").unwrap();
        assert_eq!(
            team.members_joined(),
            "ร.ต.ต.ณรงค์  บุตรพรม, ด.ต.อดุลย์  ธงศรี, ส.ต.ท.ชนาธิป  ประหา"
        );
    }

    #[test]
    fn test_roster_from_json() {
        let raw = r#"[
            {"id": "b", "name": "B", "leader": "L2", "leader_phone": "2", "members": []},
            {"id": "a", "name": "A", "leader": "L1", "leader_phone": "1", "members": ["M"]}
        ]"#;
        let roster = TeamRoster::from_json_str(raw).unwrap();
        assert_eq!(roster.teams[0].id, "a");
        assert_eq!(roster.get("b").unwrap().leader, "L2");
    }

    #[test]
    fn test_roster_rejects_bad_json() {
        assert!(matches!(
            TeamRoster::from_json_str("[]"),
            Err(TabienError::RosterError(_))
        ));
        assert!(TeamRoster::from_json_str("{").is_err());

        let duplicate = r#"[
            {"id": "1", "name": "A", "leader": "L", "leader_phone": "1", "members": []},
            {"id": "1", "name": "B", "leader": "L", "leader_phone": "1", "members": []}
        ]"#;
        assert!(TeamRoster::from_json_str(duplicate).is_err());
    }

    #[test]
    fn test_roster_numeric_ids_in_numeric_order() {
        let raw = r#"[
            {"id": "10", "name": "ชุดที่ 10", "leader": "L", "leader_phone": "1", "members": []},
            {"id": "x", "name": "X", "leader": "L", "leader_phone": "1", "members": []},
            {"id": "2", "name": "ชุดที่ 2", "leader": "L", "leader_phone": "1", "members": []}
        ]"#;
        let roster = TeamRoster::from_json_str(raw).unwrap();
        let ids: Vec<&str> = roster.teams.iter().map(|team| team.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "10", "x"]);
    }
}
