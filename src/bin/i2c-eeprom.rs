//! Read, write or erase an I2C EEPROM and print the result as a hex table.

#[cfg(target_os = "linux")]
mod cli {
    use std::{path::PathBuf, time::Duration};

    use anyhow::{Context, Result};
    use i2c_eeprom::{Geometry, LinuxBusProvider, Row, Session, ThreadSleep};
    use log::info;
    use structopt::StructOpt;

    #[derive(StructOpt, Debug)]
    #[structopt(name = "i2c-eeprom")]
    struct Opt {
        /// Directory holding the i2c-N device nodes
        #[structopt(long, default_value = "/dev", parse(from_os_str))]
        dev_root: PathBuf,

        /// I2C bus number; the first available bus if omitted
        #[structopt(short, long)]
        bus: Option<u8>,

        /// EEPROM slave address, one or two hex digits
        #[structopt(short, long, default_value = "50")]
        slave: String,

        /// Number of bytes to read, write or erase
        #[structopt(long, default_value = "256")]
        bytes: usize,

        /// EEPROM write page size
        #[structopt(long, default_value = "32")]
        page_size: u16,

        /// Write-cycle delay before each page write, in milliseconds
        #[structopt(long, default_value = "10")]
        delay_ms: u64,

        #[structopt(subcommand)]
        cmd: Command,
    }

    #[derive(StructOpt, Debug)]
    enum Command {
        /// List the available I2C buses
        List,
        /// Dump the EEPROM contents
        Read,
        /// Write the 0, 1, 2, ... test pattern, then dump
        Write,
        /// Fill with 0xFF, then dump
        Erase,
    }

    fn print_rows(rows: &[Row]) {
        for row in rows {
            println!("{row}");
        }
    }

    pub fn run() -> Result<()> {
        let opt = Opt::from_args();
        let geometry = Geometry::builder()
            .total_bytes(opt.bytes)
            .page_size(opt.page_size)
            .write_delay(Duration::from_millis(opt.delay_ms))
            .build();
        let provider = LinuxBusProvider::new(&opt.dev_root);
        let mut session = Session::new(provider, ThreadSleep, geometry);

        let interfaces = session
            .interfaces()
            .context("Error listing interfaces")?;
        if let Command::List = opt.cmd {
            for id in interfaces {
                println!("{id}");
            }
            return Ok(());
        }

        let bus = match opt.bus.or_else(|| interfaces.first().copied()) {
            Some(bus) => bus,
            None => anyhow::bail!("Invalid I2C interface: none found in {}", opt.dev_root.display()),
        };
        session
            .open(bus, &opt.slave)
            .context("Error opening interface")?;

        let result = match opt.cmd {
            Command::Write => session.write_test_pattern().context("Error writing data"),
            Command::Erase => session.erase().context("Error writing data"),
            Command::Read | Command::List => Ok(()),
        }
        .and_then(|()| {
            let rows = session.read().context("Error reading data")?;
            print_rows(rows);
            Ok(())
        });

        // Close even if the operation failed, but report the first error.
        let closed = session.close().context("Error closing interface");
        result.and(closed)?;
        info!("Done");
        Ok(())
    }
}

#[cfg(target_os = "linux")]
fn main() {
    env_logger::builder().format_timestamp_millis().init();
    if let Err(e) = cli::run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

#[cfg(not(target_os = "linux"))]
fn main() {
    eprintln!("i2c-eeprom needs the Linux i2c-dev interface.");
    std::process::exit(1);
}
