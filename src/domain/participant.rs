use serde::{Deserialize, Serialize};

use crate::domain::ParticipantId;

/// Участник розыгрыша.
///
/// После создания не меняется (только удаляется). Имя не обязано быть
/// уникальным: пресеты сопоставляются по имени, а не по id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>, department: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: department.filter(|d| !d.trim().is_empty()),
        }
    }
}
