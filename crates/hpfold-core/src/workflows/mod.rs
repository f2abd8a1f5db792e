pub mod maximize;
