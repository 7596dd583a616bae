//! Loopback tests that drive the real prober and sweeper over sockets.

#[cfg(test)]
mod discovery;
