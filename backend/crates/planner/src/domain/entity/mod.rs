//! Entity Module

pub mod daily_tasks;
pub mod goal;
pub mod weekly_plan;
