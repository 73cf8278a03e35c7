pub mod journey_api;
