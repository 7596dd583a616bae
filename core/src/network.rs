pub(crate) mod multicast;
pub(crate) mod tcp;
