use crate::constants::{MAESTRO_CHANNELS, MAESTRO_PULSE_SCALE};
use crate::controller::{BoardError, ControllerBoard};

/// A command as received by [`SimulatedBoard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    SetTarget { channel: u8, target: u16 },
    SetMultiTarget { first_channel: u8, targets: Vec<u16> },
}

/// In-memory controller board. Targets are reached instantly and every
/// command is kept for inspection.
#[derive(Debug, Clone)]
pub struct SimulatedBoard {
    pulse_scale: u16,
    positions: Vec<u16>,
    commands: Vec<BoardCommand>,
    connected: bool,
}

impl SimulatedBoard {
    pub fn new(channel_count: u8, pulse_scale: u16) -> Self {
        SimulatedBoard {
            pulse_scale,
            positions: vec![0; channel_count as usize],
            commands: Vec::new(),
            connected: true,
        }
    }

    pub fn commands(&self) -> &[BoardCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<BoardCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Overrides the reported position without recording a command, as if
    /// the servo had been moved by hand.
    pub fn set_position(&mut self, channel: u8, position: u16) -> Result<(), BoardError> {
        let slot = self.slot(channel)?;
        *slot = position;
        Ok(())
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    fn slot(&mut self, channel: u8) -> Result<&mut u16, BoardError> {
        let channel_count = self.channel_count();
        self.positions
            .get_mut(channel as usize)
            .ok_or(BoardError::ChannelOutOfRange { channel, channel_count })
    }

    fn ensure_connected(&self) -> Result<(), BoardError> {
        if self.connected {
            Ok(())
        } else {
            Err(BoardError::NotConnected)
        }
    }
}

impl Default for SimulatedBoard {
    /// An 8-channel Mini Maestro.
    fn default() -> Self {
        SimulatedBoard::new(MAESTRO_CHANNELS, MAESTRO_PULSE_SCALE)
    }
}

impl ControllerBoard for SimulatedBoard {
    fn channel_count(&self) -> u8 {
        self.positions.len() as u8
    }

    fn pulse_scale(&self) -> u16 {
        self.pulse_scale
    }

    fn get_position(&mut self, channel: u8) -> Result<u16, BoardError> {
        self.ensure_connected()?;
        self.slot(channel).map(|position| *position)
    }

    fn set_target(&mut self, channel: u8, target: u16) -> Result<(), BoardError> {
        self.ensure_connected()?;
        *self.slot(channel)? = target;
        self.commands.push(BoardCommand::SetTarget { channel, target });
        Ok(())
    }

    fn set_multi_target(&mut self, first_channel: u8, targets: &[u16]) -> Result<(), BoardError> {
        self.ensure_connected()?;
        let last = first_channel as usize + targets.len();
        if last > self.positions.len() {
            return Err(BoardError::ChannelOutOfRange {
                channel: last.saturating_sub(1).min(u8::MAX as usize) as u8,
                channel_count: self.channel_count(),
            });
        }
        self.positions[first_channel as usize..last].copy_from_slice(targets);
        self.commands.push(BoardCommand::SetMultiTarget {
            first_channel,
            targets: targets.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_target_moves_and_records() {
        let mut board = SimulatedBoard::default();
        board.set_target(3, 6000).unwrap();

        assert_eq!(board.get_position(3).unwrap(), 6000);
        assert_eq!(board.commands(), &[BoardCommand::SetTarget { channel: 3, target: 6000 }]);
    }

    #[test]
    fn test_multi_target_fills_contiguous_channels() {
        let mut board = SimulatedBoard::default();
        board.set_multi_target(5, &[1, 2, 3]).unwrap();

        assert_eq!(board.get_position(5).unwrap(), 1);
        assert_eq!(board.get_position(7).unwrap(), 3);
        assert_eq!(
            board.set_multi_target(6, &[1, 2, 3]),
            Err(BoardError::ChannelOutOfRange { channel: 8, channel_count: 8 })
        );
        assert_eq!(board.take_commands().len(), 1);
        assert!(board.commands().is_empty());
    }

    #[test]
    fn test_out_of_range_channel() {
        let mut board = SimulatedBoard::new(4, 1);
        assert_eq!(
            board.set_target(4, 1500),
            Err(BoardError::ChannelOutOfRange { channel: 4, channel_count: 4 })
        );
        assert!(board.commands().is_empty());
    }

    #[test]
    fn test_disconnected_board_rejects_everything() {
        let mut board = SimulatedBoard::default();
        board.set_connected(false);

        assert_eq!(board.get_position(0), Err(BoardError::NotConnected));
        assert_eq!(board.set_target(0, 6000), Err(BoardError::NotConnected));
        assert_eq!(board.set_multi_target(0, &[6000]), Err(BoardError::NotConnected));
    }
}
