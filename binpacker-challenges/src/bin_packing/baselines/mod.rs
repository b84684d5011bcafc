pub mod first_fit_decreasing;
