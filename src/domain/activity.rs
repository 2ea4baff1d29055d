use serde::{Deserialize, Serialize};

pub const DEFAULT_ACTIVITY_NAME: &str = "年度盛典";
pub const DEFAULT_COMPANY_NAME: &str = "科技未来有限公司";

/// Название мероприятия и компании для экрана розыгрыша.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityInfo {
    pub activity_name: String,
    pub company_name: String,
}

impl Default for ActivityInfo {
    fn default() -> Self {
        Self {
            activity_name: DEFAULT_ACTIVITY_NAME.to_string(),
            company_name: DEFAULT_COMPANY_NAME.to_string(),
        }
    }
}
