pub mod plan_401k;
