
mod frames;
mod nulls;
mod properties;
