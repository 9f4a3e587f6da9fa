mod common;
mod modules_tests;
mod plan_tests;
