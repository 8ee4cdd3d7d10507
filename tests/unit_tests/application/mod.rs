mod single_completion_orchestrator_test;
mod thread_run_orchestrator_test;
