//! Демо-данные: подставляются хостом, если в хранилище нет ни участников, ни призов.

use crate::domain::participant::Participant;
use crate::domain::prize::Prize;

const DEMO_ROSTER: [(&str, &str); 20] = [
    ("张伟", "研发部"),
    ("王芳", "产品部"),
    ("李静", "运营部"),
    ("刘洋", "行政部"),
    ("陈杰", "市场部"),
    ("杨丽", "研发部"),
    ("赵刚", "产品部"),
    ("黄勇", "运营部"),
    ("周明", "行政部"),
    ("胡军", "市场部"),
    ("朱波", "研发部"),
    ("林芳", "产品部"),
    ("何芳", "运营部"),
    ("郭峰", "行政部"),
    ("马丽", "市场部"),
    ("孙博", "研发部"),
    ("高杰", "产品部"),
    ("郑涛", "运营部"),
    ("谢明", "行政部"),
    ("韩杰", "市场部"),
];

/// 20 участников с id `p1..p20`.
pub fn demo_participants() -> Vec<Participant> {
    DEMO_ROSTER
        .iter()
        .enumerate()
        .map(|(i, (name, dept))| Participant::new(format!("p{}", i + 1), *name, Some(dept.to_string())))
        .collect()
}

/// 5 уровней призов, от главного (rank 1) до утешительного (rank 5).
pub fn demo_prizes() -> Vec<Prize> {
    vec![
        Prize::new("pz1", "特等奖", "MacBook Pro 14", 1, 1),
        Prize::new("pz2", "一等奖", "iPhone 15 Pro", 2, 2),
        Prize::new("pz3", "二等奖", "iPad Air", 3, 3),
        Prize::new("pz4", "三等奖", "AirPods Pro 2", 5, 4),
        Prize::new("pz5", "幸运奖", "精美茶具套装", 9, 5),
    ]
}
