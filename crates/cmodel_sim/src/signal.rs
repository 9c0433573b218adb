//! Descriptors for the signals of the counter design.

use std::fmt;

/// Scope of the counter module below the top instance.
pub const COUNTER_SCOPE: &str = "counter";

/// Port direction of a signal, or `Internal` for state below the ports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Driven by the harness.
    Input,
    /// Driven by the design.
    Output,
    /// Design state with no port.
    Internal,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Input => "input",
            Direction::Output => "output",
            Direction::Internal => "internal",
        })
    }
}

/// One of the five signals of the counter design.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CounterSignal {
    /// `CLK`, the clock input.
    Clk,
    /// `RST`, synchronous active-high reset.
    Rst,
    /// `EN`, count enable.
    En,
    /// `DATA`, the 16-bit counter output.
    Data,
    /// `counter.iDATA`, the 16-bit counter register.
    Count,
}

impl CounterSignal {
    /// Every signal, in declaration order.
    pub const ALL: [CounterSignal; 5] = [
        CounterSignal::Clk,
        CounterSignal::Rst,
        CounterSignal::En,
        CounterSignal::Data,
        CounterSignal::Count,
    ];

    /// Leaf name of the signal within its scope.
    pub fn name(self) -> &'static str {
        match self {
            CounterSignal::Clk => "CLK",
            CounterSignal::Rst => "RST",
            CounterSignal::En => "EN",
            CounterSignal::Data => "DATA",
            CounterSignal::Count => "iDATA",
        }
    }

    /// Scope below the top instance, if any.
    pub fn scope(self) -> Option<&'static str> {
        match self {
            CounterSignal::Count => Some(COUNTER_SCOPE),
            _ => None,
        }
    }

    /// Declared width in bits.
    pub fn width(self) -> u32 {
        match self {
            CounterSignal::Clk | CounterSignal::Rst | CounterSignal::En => 1,
            CounterSignal::Data | CounterSignal::Count => 16,
        }
    }

    /// Direction of the signal.
    pub fn direction(self) -> Direction {
        match self {
            CounterSignal::Clk | CounterSignal::Rst | CounterSignal::En => Direction::Input,
            CounterSignal::Data => Direction::Output,
            CounterSignal::Count => Direction::Internal,
        }
    }

    /// Name relative to the top instance, e.g. `DATA` or `counter.iDATA`.
    pub fn relative_name(self) -> String {
        match self.scope() {
            Some(scope) => format!("{scope}.{}", self.name()),
            None => self.name().to_string(),
        }
    }

    /// Hierarchical name below `instance`, e.g. `TOP.counter.iDATA`.
    pub fn hier_name(self, instance: &str) -> String {
        format!("{instance}.{}", self.relative_name())
    }
}
