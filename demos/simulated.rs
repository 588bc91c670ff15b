//! Runs the measurement loop against a simulated sensor whose readings drift a little on every
//! cycle. Every fifth cycle the sensor is slow to convert and needs a few read retries.

use std::thread::sleep;
use std::time::Duration;

use sht3x_oneshot::sim::SimulatedSensor;
use sht3x_oneshot::{DeviceAddress, RetryPolicy, Sht3x};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let fast = SimulatedSensor::new(DeviceAddress::A1);
    let slow = SimulatedSensor::new(DeviceAddress::A1).with_busy_reads(2);
    let mut fast_sht = Sht3x::with_policy(fast.clone(), RetryPolicy::immediate());
    let mut slow_sht = Sht3x::new(slow.clone());

    for cycle in 0..10u8 {
        let celsius = 21.0 + f32::from(cycle) * 0.25;
        let percent = 40.0 + f32::from(cycle);
        let sht = if cycle % 5 == 4 {
            slow.set_physical(celsius, percent);
            &mut slow_sht
        } else {
            fast.set_physical(celsius, percent);
            &mut fast_sht
        };

        let reading = sht.update(DeviceAddress::A1)?;
        println!(
            "#{} T = {:.2}°C RH = {:.2}% (raw {:#06x} {:#06x})",
            cycle,
            reading.celsius(),
            reading.percent(),
            reading.temperature,
            reading.humidity
        );
        sleep(Duration::from_millis(200));
    }
    Ok(())
}
