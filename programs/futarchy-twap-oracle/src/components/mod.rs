pub mod twap_engine;
