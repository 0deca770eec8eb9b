/// Twin Delayed DDPG
pub mod td3;
