//! Reads ambient temperature and humidity once a second from an SHT3x attached to an
//! i2c-tiny-usb adapter.
//!
//! ```
//! $ RUST_LOG=debug cargo run --example sht3x
//!  T = 22.14°C
//! RH = 42.30%
//! ```

use std::thread::sleep;
use std::time::Duration;

use sht3x_oneshot::usb::UsbAdapter;
use sht3x_oneshot::{DeviceAddress, Sht3x};

// can be A1 depending on the ADDR pin
const ADDRESS: DeviceAddress = DeviceAddress::A0;

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut sht = Sht3x::new(UsbAdapter::default());
    loop {
        // on failure the previous reading is still cached
        let _ = sht.update(ADDRESS);
        if !sht.status().is_ok() {
            println!("status {}, showing last good reading", sht.status().code());
        }
        println!(" T = {:.2}°C", sht.temperature_celsius());
        println!("RH = {:.2}%", sht.humidity_percent());
        sleep(Duration::from_secs(1));
    }
}
