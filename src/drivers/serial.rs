use std::io::Read;
use std::time::Duration;
use serialport::SerialPort;
use crate::drivers::source::{LineAssembler, LineSource};
use crate::drivers::ThermalError;
const READ_TIMEOUT: Duration = Duration::from_millis(5);
/// Sensor connected over a serial port. Reads only what the driver reports as
/// already buffered, so a poll never waits on the wire.
pub struct SerialLineSource {
    port_name: String,
    port: Box<dyn SerialPort>,
    assembler: LineAssembler,
    scratch: Vec<u8>,
}
impl SerialLineSource {
    pub fn open(port_name: &str, baud_rate: u32, line_threshold: usize) -> Result<Self, ThermalError> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|source| ThermalError::SerialOpen {
                port: port_name.to_owned(),
                source,
            })?;
        log::info!("opened serial port {port_name} at {baud_rate} baud");
        Ok(Self {
            port_name: port_name.to_owned(),
            port,
            assembler: LineAssembler::new(line_threshold),
            scratch: vec![0; 1024],
        })
    }
    fn drain_available(&mut self) -> Result<(), ThermalError> {
        let available = self.port.bytes_to_read()? as usize;
        if available == 0 {
            return Ok(());
        }
        if self.scratch.len() < available {
            self.scratch.resize(available, 0);
        }
        let read = match self.port.read(&mut self.scratch[..available]) {
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => 0,
            Err(e) => return Err(e.into()),
        };
        self.assembler.push(&self.scratch[..read]);
        Ok(())
    }
}
impl LineSource for SerialLineSource {
    fn poll_line(&mut self) -> Result<Option<String>, ThermalError> {
        self.drain_available()?;
        Ok(self.assembler.next_line())
    }
    fn describe(&self) -> String {
        format!("serial {}", self.port_name)
    }
}
/// Names of the serial ports the OS currently reports.
pub fn list_ports() -> Result<Vec<String>, ThermalError> {
    Ok(serialport::available_ports()?
        .into_iter()
        .map(|p| p.port_name)
        .collect())
}
