pub mod dtlz1;
pub mod dtlz2;

use crate::error::ConfigurationError;

/// Every DTLZ instance needs at least one variable per objective.
fn check_shape(name: &str, n_var: usize, n_obj: usize) -> Result<(), ConfigurationError> {
    if n_var < n_obj {
        return Err(ConfigurationError::ProblemShape(
            format!("{} needs at least {} variables, got {}", name, n_obj, n_var)
        ));
    }

    Ok(())
}

fn g1(x_m: &[f64]) -> f64
{
    let mut sum = 0.0;

    for x_m_i in x_m
    {
        sum += (x_m_i - 0.5).powi(2) - (20.0 * std::f64::consts::PI * (x_m_i - 0.5)).cos();
    }

    100.0 * (x_m.len() as f64 + sum)
}

fn g2(x_m: &[f64]) -> f64
{
    let mut sum = 0.0;

    for x_m_i in x_m.iter()
    {
        sum += (x_m_i - 0.5).powi(2);
    }

    sum
}

/// Splits the decision vector into the position part and the distance part.
fn split_position(x: &[f64], n_obj: usize) -> (&[f64], &[f64])
{
    x.split_at(n_obj - 1)
}

fn calc_spherical_target(x: &[f64], g: f64, f: &mut [f64])
{
    for i in 0..f.len()
    {
        let mut f_val = 1.0 + g;

        for x_i in &x[..x.len() - i]
        {
            f_val *= (x_i * std::f64::consts::PI / 2.0).cos();
        }

        if i > 0
        {
            f_val *= (x[x.len() - i] * std::f64::consts::PI / 2.0).sin();
        }

        f[i] = f_val;
    }
}

fn calc_linear_target(x: &[f64], g: f64, f: &mut [f64])
{
    for i in 0..f.len()
    {
        let mut f_val = 0.5 * (1.0 + g);

        for x_i in &x[..x.len() - i]
        {
            f_val *= x_i;
        }

        if i > 0
        {
            f_val *= 1.0 - x[x.len() - i];
        }

        f[i] = f_val;
    }
}
