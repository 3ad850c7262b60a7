// 每个集成测试二进制单独编译本模块，未用到的辅助函数不算死代码
#![allow(dead_code)]

pub mod fixtures;
