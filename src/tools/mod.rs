pub mod bidmath;
