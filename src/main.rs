use std::{env, fs, ops::Sub};

use anyhow::Context;
use log::info;
use serde_json::{Value, json};
use vmc_optim::{Complex64, Optimizer};

const STEPS: usize = 500;

/// Minimizes `½‖x − target‖²`, whose gradient is `x − target`, and returns the final distance.
fn fit_real(optimizer: &mut Optimizer) -> anyhow::Result<f64> {
    let target = [1.5_f64, -0.5, 3.];
    let mut params = [0_f64; 3];
    let mut grad = [0_f64; 3];

    optimizer.init(&params);

    for step in 0..STEPS {
        for ((g, p), t) in grad.iter_mut().zip(&params).zip(&target) {
            *g = p - t;
        }

        optimizer.update(&grad, &mut params)?;

        if step % 100 == 0 {
            info!("real step {step}: params={params:?}");
        }
    }

    Ok(distance(&params, &target, |d: f64| d * d))
}

/// Same as `fit_real` over complex parameters, with gradient `x − target` in the Wirtinger sense.
fn fit_complex(optimizer: &mut Optimizer) -> anyhow::Result<f64> {
    let target = [Complex64::new(1., -1.), Complex64::new(-0.25, 2.)];
    let mut params = [Complex64::new(0., 0.); 2];
    let mut grad = [Complex64::new(0., 0.); 2];

    optimizer.init(&params);

    for step in 0..STEPS {
        for ((g, p), t) in grad.iter_mut().zip(&params).zip(&target) {
            *g = p - t;
        }

        optimizer.update(&grad, &mut params)?;

        if step % 100 == 0 {
            info!("complex step {step}: params={params:?}");
        }
    }

    Ok(distance(&params, &target, |d: Complex64| d.norm_sqr()))
}

fn distance<T>(a: &[T], b: &[T], sq: impl Fn(T) -> f64) -> f64
where
    T: Copy + Sub<Output = T>,
{
    a.iter()
        .zip(b)
        .map(|(&x, &y)| sq(x - y))
        .sum::<f64>()
        .sqrt()
}

fn load_descriptor() -> anyhow::Result<Value> {
    let Some(path) = env::args().nth(1) else {
        return Ok(json!({ "Optimizer": { "Name": "AdaGrad", "LearningRate": 0.5 } }));
    };

    let content = fs::read_to_string(&path).with_context(|| format!("cannot read '{path}'"))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in '{path}'"))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let descriptor = load_descriptor()?;
    let mut optimizer = Optimizer::new(&descriptor)?;
    info!("using {}", optimizer.name());

    let real = fit_real(&mut optimizer)?;
    info!("real fit finished {STEPS} steps, distance to target {real:.3e}");

    let complex = fit_complex(&mut optimizer)?;
    info!("complex fit finished {STEPS} steps, distance to target {complex:.3e}");

    Ok(())
}
