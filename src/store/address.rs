// ==========================================
// 游戏数据表导入工具 - 本地地址计算
// ==========================================
// 不变式: 地址由 (表名, 数据起始行) 确定性计算;
// 同一次运行内不同表的地址不得碰撞
// ==========================================

// FNV-1a 32 位参数
const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 计算表的本地存储地址
///
/// FNV-1a 散列表名后混入行偏移；结果恒非零
pub fn compute_local_address(table_name: &str, row_offset: u32) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;

    for byte in table_name.as_bytes() {
        hash ^= *byte as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
    }

    for byte in row_offset.to_le_bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
    }

    if hash == 0 {
        FNV_OFFSET_BASIS
    } else {
        hash
    }
}

/// 本地地址对应的存储段表名
pub fn segment_table_name(local_address: u32) -> String {
    format!("seg_{:08x}", local_address)
}
