mod health_test;
mod middleware_test;
mod scheduling_test;
